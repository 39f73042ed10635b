//! Integration tests for the lesson pipelines.
//!
//! Runs `LessonsService` end to end against a temporary document:
//! - transcript extraction lands in a new section
//! - commit batches are grouped per category
//! - manual lessons, point appends and takeaway edits
//! - failures are reported without touching the document

// Integration tests use expect/unwrap/panic for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use lessonkit::config::FeatureNames;
use lessonkit::git::CommitSource;
use lessonkit::models::{Category, CommitInfo, PointDraft};
use lessonkit::services::{LessonSource, LessonsService, MISSING_TAKEAWAY};
use lessonkit::storage::{DEFAULT_BACKUP_SUFFIX, DocumentStore};
use lessonkit::{Error, Result};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// ============================================================================
// Fixtures
// ============================================================================

const TRANSCRIPT: &str = "User: working on the team creation wizard, it shows a blank page. \
turns out the container needed a height constraint - fixed by adding heightAnchor";

/// Two exchanges that land in different categories with different features.
const TWO_FEATURE_TRANSCRIPT: &str = "\
User: working on the wallet page, the request failed. turns out the api token expired - fixed by refreshing it
User: adding the team wizard, it shows a blank page. turns out the container needed a height constraint - fixed by adding heightAnchor
";

const PROJECT_DOC: &str = "# Project\n\nSome notes.\n";

/// Commit source backed by a fixed, newest-first list.
struct FixedCommits(Vec<CommitInfo>);

impl CommitSource for FixedCommits {
    fn recent(&self, limit: usize) -> Result<Vec<CommitInfo>> {
        Ok(self.0.iter().take(limit).cloned().collect())
    }

    fn head(&self) -> Result<Option<String>> {
        Ok(self.0.first().map(|c| c.hash.clone()))
    }

    fn commit(&self, rev: &str) -> Result<CommitInfo> {
        self.0
            .iter()
            .find(|c| c.hash == rev)
            .cloned()
            .ok_or_else(|| Error::InvalidInput(rev.to_string()))
    }
}

fn commit(hash: &str, message: &str, file: &str) -> CommitInfo {
    CommitInfo {
        hash: hash.to_string(),
        message: message.to_string(),
        author: "dev".to_string(),
        date: "2024-03-01T12:00:00+00:00".to_string(),
        files_changed: vec![file.to_string()],
        line_count: 12,
    }
}

fn history() -> Vec<CommitInfo> {
    vec![
        commit("1111111111aa", "fix: team wizard constraint broke layout", "TeamView.swift"),
        commit("2222222222bb", "docs: update readme", "README.md"),
        commit("3333333333cc", "fix: build failed in xcode", "project.pbxproj"),
    ]
}

struct Workspace {
    _dir: TempDir,
    path: PathBuf,
    service: LessonsService<FixedCommits>,
}

impl Workspace {
    fn new(document: Option<&str>) -> Self {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("CLAUDE.md");
        if let Some(text) = document {
            fs::write(&path, text).unwrap_or_else(|e| panic!("seed document: {e}"));
        }
        let service = LessonsService::new(
            DocumentStore::new(&path, DEFAULT_BACKUP_SUFFIX),
            FixedCommits(history()),
            FeatureNames::default(),
        );
        Self {
            _dir: dir,
            path,
            service,
        }
    }

    fn document(&self) -> String {
        fs::read_to_string(&self.path).unwrap_or_else(|e| panic!("read document: {e}"))
    }
}

// ============================================================================
// Extraction pipelines
// ============================================================================

#[test]
fn test_analyze_chat_appends_section() {
    let ws = Workspace::new(Some(PROJECT_DOC));

    let report = ws.service.analyze_chat(TRANSCRIPT);

    assert_eq!(report.source, LessonSource::Chat);
    assert_eq!(report.lesson_count(), 1);
    assert_eq!(report.category_list(), vec![Category::UiLayout]);
    assert!(report.document_updated());

    let result = &report.categories[0];
    assert_eq!(result.feature_name, "Team Management");
    assert!(
        result
            .formatted_section
            .starts_with("### Team Management Layout Fix - Key Learnings\n")
    );

    let document = ws.document();
    assert!(document.starts_with(PROJECT_DOC));
    assert!(document.contains("### Team Management Layout Fix - Key Learnings"));
    assert!(document.contains("#### 1. **"));
    assert!(document.contains("**Key Takeaway**:"));
}

#[test]
fn test_analyze_chat_names_each_category_from_its_own_lessons() {
    let ws = Workspace::new(Some(PROJECT_DOC));

    let report = ws.service.analyze_chat(TWO_FEATURE_TRANSCRIPT);

    assert_eq!(
        report.category_list(),
        vec![Category::ApiIntegration, Category::UiLayout]
    );
    let names: Vec<&str> = report
        .categories
        .iter()
        .map(|c| c.feature_name.as_str())
        .collect();
    assert_eq!(names, vec!["Bitcoin Wallet", "Team Management"]);

    let document = ws.document();
    assert!(document.contains("### Bitcoin Wallet API Integration - Key Learnings"));
    assert!(document.contains("### Team Management Layout Fix - Key Learnings"));
}

#[test]
fn test_analyze_chat_without_lessons_leaves_document() {
    let ws = Workspace::new(Some(PROJECT_DOC));

    let report = ws.service.analyze_chat("User: hello\nAssistant: hi there");

    assert!(report.categories.is_empty());
    assert!(!report.document_updated());
    assert_eq!(ws.document(), PROJECT_DOC);
}

#[test]
fn test_analyze_commits_groups_by_category() {
    let ws = Workspace::new(Some(PROJECT_DOC));

    let report = ws
        .service
        .analyze_commits(10)
        .unwrap_or_else(|e| panic!("analyze commits: {e}"));

    assert_eq!(report.source, LessonSource::Commits);
    assert_eq!(
        report.category_list(),
        vec![Category::UiLayout, Category::BuildCompilation]
    );
    assert!(report.categories.iter().all(|c| c.merge.applied));
    let names: Vec<&str> = report
        .categories
        .iter()
        .map(|c| c.feature_name.as_str())
        .collect();
    assert_eq!(names, vec!["Team System", "Build Configuration"]);

    let document = ws.document();
    let layout = document
        .find("### Team System Layout Fix - Key Learnings")
        .unwrap_or_else(|| panic!("layout section missing:\n{document}"));
    let build = document
        .find("### Build Configuration Build Configuration - Key Learnings")
        .unwrap_or_else(|| panic!("build section missing:\n{document}"));
    assert!(layout < build);
    assert!(document.contains("Commit: `11111111`"));
    assert!(!document.contains("readme"));
}

#[test]
fn test_analyze_commits_respects_limit() {
    let ws = Workspace::new(Some(PROJECT_DOC));

    let report = ws
        .service
        .analyze_commits(1)
        .unwrap_or_else(|e| panic!("analyze commits: {e}"));

    assert_eq!(report.lesson_count(), 1);
    assert_eq!(report.category_list(), vec![Category::UiLayout]);
}

#[test]
fn test_full_analysis_summary() {
    let ws = Workspace::new(Some(PROJECT_DOC));

    let report = ws
        .service
        .full_analysis(Some(TRANSCRIPT), 10)
        .unwrap_or_else(|e| panic!("full analysis: {e}"));

    assert!(report.chat.is_some());
    assert_eq!(report.summary.total_lessons_extracted, 3);
    assert_eq!(report.summary.chat_categories, vec![Category::UiLayout]);
    assert_eq!(report.summary.commit_categories.len(), 2);
    assert!(report.summary.document_updated);

    let json = serde_json::to_value(&report).unwrap_or_else(|e| panic!("serialize: {e}"));
    assert_eq!(json["commits"]["source"], "commits");
    assert_eq!(json["summary"]["total_lessons_extracted"], 3);
}

#[test]
fn test_full_analysis_without_transcript() {
    let ws = Workspace::new(Some(PROJECT_DOC));

    let report = ws
        .service
        .full_analysis(None, 10)
        .unwrap_or_else(|e| panic!("full analysis: {e}"));

    assert!(report.chat.is_none());
    assert!(report.summary.chat_categories.is_empty());
    assert_eq!(report.summary.total_lessons_extracted, 2);
}

// ============================================================================
// Direct edits
// ============================================================================

#[test]
fn test_manual_then_append_then_stats() {
    let ws = Workspace::new(Some(PROJECT_DOC));

    let report = ws.service.manual(
        "Checkout Flow",
        "the build failed",
        "added the missing import",
        Category::BuildCompilation,
    );
    assert_eq!(report.source, LessonSource::Manual);
    assert!(report.document_updated());

    let edit = ws.service.append_points(
        "checkout flow",
        &[PointDraft::new(
            "Import Hygiene",
            vec!["Check module imports first".to_string()],
        )],
    );
    assert!(edit.merge.applied, "{}", edit.merge.message);
    assert_eq!(edit.points.len(), 1);
    assert_eq!(edit.points[0].number, 2);

    let section = edit
        .updated_section
        .unwrap_or_else(|| panic!("section should be read back"));
    let numbers: Vec<usize> = section.points.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2]);

    let document = ws.document();
    let point = document
        .find("#### 2. **Import Hygiene**")
        .unwrap_or_else(|| panic!("point missing:\n{document}"));
    let takeaway = document
        .find("**Key Takeaway**:")
        .unwrap_or_else(|| panic!("takeaway missing:\n{document}"));
    assert!(point < takeaway);

    let stats = ws.service.stats().unwrap_or_else(|e| panic!("stats: {e}"));
    assert_eq!(stats.total_sections, 1);
    assert_eq!(stats.total_points, 2);
    assert_eq!(stats.sections_in(Category::BuildCompilation), 1);
}

#[test]
fn test_update_takeaway_rewrites_line() {
    let ws = Workspace::new(Some(PROJECT_DOC));
    ws.service
        .manual("Wallet", "request failed", "retry the api call", Category::ApiIntegration);

    let edit = ws
        .service
        .update_takeaway("wallet", "Always retry idempotent requests.");

    assert!(edit.merge.applied, "{}", edit.merge.message);
    let section = edit
        .updated_section
        .unwrap_or_else(|| panic!("section should be read back"));
    assert_eq!(
        section.takeaway.as_deref(),
        Some("Always retry idempotent requests.")
    );
    assert!(
        ws.document()
            .contains("**Key Takeaway**: Always retry idempotent requests.\n")
    );
}

#[test]
fn test_update_takeaway_without_takeaway_line() {
    let original = "# P\n\n### Onboarding - Key Learnings\n\n#### 1. **Step**\n- bullet\n";
    let ws = Workspace::new(Some(original));

    let edit = ws.service.update_takeaway("onboarding", "New sentence.");

    assert!(!edit.merge.applied);
    assert_eq!(edit.merge.message, MISSING_TAKEAWAY);
    assert!(edit.updated_section.is_none());
    assert_eq!(ws.document(), original);
}

#[test]
fn test_append_to_missing_section_reports_failure() {
    let ws = Workspace::new(Some(PROJECT_DOC));

    let edit = ws.service.append_points(
        "No Such Section",
        &[PointDraft::new("Title", vec!["bullet".to_string()])],
    );

    assert!(!edit.merge.applied);
    assert!(edit.merge.message.contains("not found"));
    assert!(edit.points.is_empty());
    assert_eq!(ws.document(), PROJECT_DOC);
}

#[test]
fn test_missing_document_is_reported_not_created() {
    let ws = Workspace::new(None);

    let report = ws.service.analyze_chat(TRANSCRIPT);

    assert_eq!(report.lesson_count(), 1);
    assert!(!report.document_updated());
    assert!(!ws.path.exists());
    assert!(ws.service.stats().is_err());
}

#[test]
fn test_backup_written_next_to_document() {
    let ws = Workspace::new(Some(PROJECT_DOC));

    ws.service.analyze_chat(TRANSCRIPT);

    let backup = ws.service.store().backup_path().to_path_buf();
    let saved = fs::read_to_string(&backup).unwrap_or_else(|e| panic!("read backup: {e}"));
    assert_eq!(saved, PROJECT_DOC);
}
