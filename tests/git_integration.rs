//! Integration tests for the git-backed commit pipeline.
//!
//! Builds real repositories in temporary directories and runs the commit
//! pipeline and the commit monitor against them.

// Integration tests use expect/unwrap/panic for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use git2::{Commit, Repository, Signature};
use lessonkit::config::LessonkitConfig;
use lessonkit::git::{CommitSource, GitCommitLog};
use lessonkit::models::Category;
use lessonkit::services::LessonsService;
use lessonkit::{CommitMonitor, Error};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn init_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let repo = Repository::init(dir.path()).unwrap_or_else(|e| panic!("init: {e}"));
    (dir, repo)
}

fn commit_file(repo: &Repository, name: &str, body: &str, message: &str) {
    let workdir = repo
        .workdir()
        .unwrap_or_else(|| panic!("repository has no workdir"));
    fs::write(workdir.join(name), body).unwrap_or_else(|e| panic!("write {name}: {e}"));

    let sig = Signature::now("dev", "dev@example.com").unwrap_or_else(|e| panic!("{e}"));
    let mut index = repo.index().unwrap_or_else(|e| panic!("{e}"));
    index
        .add_path(Path::new(name))
        .unwrap_or_else(|e| panic!("{e}"));
    index.write().unwrap_or_else(|e| panic!("{e}"));
    let tree_id = index.write_tree().unwrap_or_else(|e| panic!("{e}"));
    let tree = repo.find_tree(tree_id).unwrap_or_else(|e| panic!("{e}"));
    let parent = repo
        .head()
        .ok()
        .and_then(|h| h.target())
        .and_then(|oid| repo.find_commit(oid).ok());
    let parents: Vec<&Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap_or_else(|e| panic!("commit: {e}"));
}

fn service_for(dir: &TempDir) -> LessonsService<GitCommitLog> {
    fs::write(dir.path().join("CLAUDE.md"), "# Project\n")
        .unwrap_or_else(|e| panic!("seed document: {e}"));
    let config = LessonkitConfig::new().with_project_path(dir.path());
    LessonsService::from_config(&config)
}

#[test]
fn test_commit_pipeline_over_real_history() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "README.md", "hello\n", "chore: initial commit");
    commit_file(
        &repo,
        "TeamView.swift",
        "let a = 1\nlet b = 2\n",
        "fix: team view constraint clipped the header",
    );
    let service = service_for(&dir);

    let report = service
        .analyze_commits(10)
        .unwrap_or_else(|e| panic!("analyze commits: {e}"));

    assert_eq!(report.lesson_count(), 1);
    assert_eq!(report.category_list(), vec![Category::UiLayout]);
    let lesson = &report.categories[0].lessons[0];
    assert_eq!(lesson.evidence.files, vec!["TeamView.swift".to_string()]);
    assert_eq!(lesson.evidence.lines_changed, Some(2));

    let document = fs::read_to_string(dir.path().join("CLAUDE.md"))
        .unwrap_or_else(|e| panic!("read document: {e}"));
    assert!(document.contains("### Team System Layout Fix - Key Learnings"));
    assert!(document.contains("Files involved: TeamView.swift"));
}

#[test]
fn test_head_and_commit_lookup() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "a.txt", "a\n", "chore: first");
    commit_file(&repo, "b.txt", "b\n", "fix: second");
    let log = GitCommitLog::new(dir.path());

    let head = log
        .head()
        .unwrap_or_else(|e| panic!("head: {e}"))
        .unwrap_or_else(|| panic!("head should exist"));
    let commit = log.commit(&head).unwrap_or_else(|e| panic!("commit: {e}"));
    assert_eq!(commit.hash, head);
    assert_eq!(commit.message, "fix: second");

    let recent = log.recent(1).unwrap_or_else(|e| panic!("recent: {e}"));
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].hash, head);
}

#[test]
fn test_unknown_revision_is_invalid_input() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "a.txt", "a\n", "chore: first");
    let log = GitCommitLog::new(dir.path());

    assert!(matches!(
        log.commit("does-not-exist"),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_not_a_repository() {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let log = GitCommitLog::new(dir.path().join("missing"));

    assert!(matches!(log.recent(5), Err(Error::OperationFailed { .. })));
}

#[test]
fn test_monitor_picks_up_new_commit() {
    let (dir, repo) = init_repo();
    commit_file(&repo, "a.txt", "a\n", "chore: first");
    let service = service_for(&dir);

    let mut monitor = CommitMonitor::new(Duration::ZERO);
    monitor.prime(&service).unwrap_or_else(|e| panic!("prime: {e}"));
    assert!(matches!(monitor.tick(&service), Ok(None)));

    commit_file(
        &repo,
        "Build.xcconfig",
        "SWIFT_VERSION = 5\n",
        "fix: build settings for xcode",
    );
    let report = monitor
        .tick(&service)
        .unwrap_or_else(|e| panic!("tick: {e}"))
        .unwrap_or_else(|| panic!("new commit should be analysed"));

    assert_eq!(report.category_list(), vec![Category::BuildCompilation]);
    assert!(report.document_updated());
    assert!(matches!(monitor.tick(&service), Ok(None)));
}
