//! Lesson extraction from commit history.

use super::patterns::{
    COMMIT_CONTEXT_PATTERNS, COMMIT_FIX_PATTERNS, COMMIT_PROBLEM_PATTERNS,
    COMMIT_SOLUTION_PATTERNS, any_match,
};
use super::FALLBACK_CONTEXT;
use crate::classifier;
use crate::models::{CommitInfo, Evidence, LessonRecord};

const FALLBACK_COMMIT_PROBLEM: &str = "Development issue encountered";
const FALLBACK_COMMIT_SOLUTION: &str = "Applied technical fix";

/// Extracts lessons from commits whose subject describes a fix.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitExtractor;

impl CommitExtractor {
    /// Creates a new commit extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Extracts a lesson from one commit.
    ///
    /// A fix subject is both the problem and the solution signal; any other
    /// commit yields `None`.
    #[must_use]
    pub fn extract(&self, commit: &CommitInfo) -> Option<LessonRecord> {
        let message = commit.message.as_str();
        if !any_match(&COMMIT_FIX_PATTERNS, message) {
            return None;
        }

        let evidence = Evidence {
            files: commit.files_changed.clone(),
            commit_hash: Some(commit.short_hash().to_string()),
            commit_message: Some(message.to_string()),
            lines_changed: Some(commit.line_count),
            timestamp: Some(commit.date.clone()),
            ..Evidence::default()
        };

        Some(
            LessonRecord::new(
                extract_context(message),
                extract_problem(message),
                extract_solution(message, &commit.files_changed),
                classifier::classify_commit(message, &commit.files_changed),
            )
            .with_evidence(evidence),
        )
    }

    /// Extracts lessons from every fix commit, preserving log order.
    #[must_use]
    pub fn extract_all(&self, commits: &[CommitInfo]) -> Vec<LessonRecord> {
        commits.iter().filter_map(|c| self.extract(c)).collect()
    }
}

fn extract_context(message: &str) -> String {
    let from_patterns = COMMIT_CONTEXT_PATTERNS.iter().find_map(|signal| {
        signal
            .pattern
            .captures(message)
            .and_then(|caps| caps.name("ctx"))
            .map(|m| m.as_str().trim().to_string())
            .filter(|ctx| !ctx.is_empty())
    });

    from_patterns
        .or_else(|| {
            message
                .split(':')
                .nth(1)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| FALLBACK_CONTEXT.to_string())
}

fn extract_problem(message: &str) -> String {
    if let Some(found) = COMMIT_PROBLEM_PATTERNS
        .iter()
        .find_map(|signal| signal.pattern.find(message))
    {
        return found.as_str().to_string();
    }

    COMMIT_FIX_PATTERNS
        .iter()
        .find_map(|signal| {
            signal
                .pattern
                .captures(message)
                .and_then(|caps| caps.name("target"))
                .map(|target| format!("Issue with {}", target.as_str().trim()))
        })
        .unwrap_or_else(|| FALLBACK_COMMIT_PROBLEM.to_string())
}

fn extract_solution(message: &str, files_changed: &[String]) -> String {
    if let Some(found) = COMMIT_SOLUTION_PATTERNS
        .iter()
        .find_map(|signal| signal.pattern.find(message))
    {
        return found.as_str().to_string();
    }

    let touched = |marker: &str| files_changed.iter().any(|f| f.contains(marker));
    if touched("View") {
        "Updated UI components and layout constraints".to_string()
    } else if touched("Service") {
        "Modified service layer implementation".to_string()
    } else if touched("Controller") {
        "Fixed view controller logic and navigation".to_string()
    } else {
        FALLBACK_COMMIT_SOLUTION.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn commit(message: &str, files: &[&str]) -> CommitInfo {
        CommitInfo {
            hash: "a1b2c3d4e5f60718293a".to_string(),
            message: message.to_string(),
            author: "dev".to_string(),
            date: "2026-01-02T03:04:05+00:00".to_string(),
            files_changed: files.iter().map(ToString::to_string).collect(),
            line_count: 12,
        }
    }

    #[test]
    fn test_non_fix_commit_is_skipped() {
        assert!(
            CommitExtractor::new()
                .extract(&commit("Add leaderboard screen", &[]))
                .is_none()
        );
    }

    #[test]
    fn test_fix_commit_with_problem_description() {
        let record = CommitExtractor::new()
            .extract(&commit(
                "fix: wizard blank page - added height constraint to container",
                &["TeamWizardView.swift"],
            ))
            .unwrap_or_else(|| panic!("fix commit should yield a lesson"));

        assert_eq!(record.problem, "blank page");
        assert_eq!(record.solution, "added height constraint to container");
        assert_eq!(record.category, Category::UiLayout);
        assert_eq!(record.evidence.commit_hash.as_deref(), Some("a1b2c3d4"));
        assert_eq!(record.evidence.lines_changed, Some(12));
        assert_eq!(record.evidence.files, vec!["TeamWizardView.swift".to_string()]);
    }

    #[test]
    fn test_problem_falls_back_to_fix_target() {
        let record = CommitExtractor::new()
            .extract(&commit("resolve: stale wallet balance", &[]))
            .unwrap_or_else(|| panic!("resolve commit should yield a lesson"));
        assert_eq!(record.problem, "Issue with stale wallet balance");
        assert_eq!(record.context, "stale wallet balance");
        assert_eq!(record.solution, FALLBACK_COMMIT_SOLUTION);
        assert_eq!(record.category, Category::General);
    }

    #[test]
    fn test_solution_inferred_from_files() {
        let record = CommitExtractor::new()
            .extract(&commit("fix: balance refresh", &["WalletService.swift"]))
            .unwrap_or_else(|| panic!("fix commit should yield a lesson"));
        assert_eq!(record.solution, "Modified service layer implementation");
        assert_eq!(record.category, Category::Architecture);
    }

    #[test]
    fn test_extract_all_preserves_order() {
        let commits = vec![
            commit("fix: first thing", &[]),
            commit("docs: readme", &[]),
            commit("bug fix: second thing", &[]),
        ];
        let records = CommitExtractor::new().extract_all(&commits);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].context, "first thing");
        assert_eq!(records[1].context, "second thing");
    }
}
