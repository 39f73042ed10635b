//! Lesson records and their supporting evidence.

use super::Category;
use serde::{Deserialize, Serialize};

/// The unit of knowledge extracted from a chat span or a commit.
///
/// Records are produced by the extraction layer (or built by hand) and are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRecord {
    /// What was being built.
    pub context: String,
    /// What went wrong.
    pub problem: String,
    /// How it was fixed.
    pub solution: String,
    /// Assigned category.
    pub category: Category,
    /// Presentation-only supporting data.
    #[serde(default, skip_serializing_if = "Evidence::is_empty")]
    pub evidence: Evidence,
}

impl LessonRecord {
    /// Creates a record without evidence.
    #[must_use]
    pub fn new(
        context: impl Into<String>,
        problem: impl Into<String>,
        solution: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            context: context.into(),
            problem: problem.into(),
            solution: solution.into(),
            category,
            evidence: Evidence::default(),
        }
    }

    /// Attaches evidence.
    #[must_use]
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence = evidence;
        self
    }

    /// Problem and solution text, lower-cased, for keyword scans.
    #[must_use]
    pub fn problem_and_solution_lower(&self) -> String {
        format!("{} {}", self.problem, self.solution).to_lowercase()
    }
}

/// Optional supporting data attached to a lesson.
///
/// Never consulted by the merge engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Referenced source files.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
    /// Time spent, e.g. "2 hours".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<String>,
    /// Abbreviated commit hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,
    /// Full commit subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
    /// Lines touched by the commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines_changed: Option<usize>,
    /// Commit date (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Evidence {
    /// Returns true when no evidence was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One commit as reported by a version-control log reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Full commit hash.
    pub hash: String,
    /// Commit subject line.
    pub message: String,
    /// Author name.
    pub author: String,
    /// Commit date (RFC 3339).
    pub date: String,
    /// Paths touched by the commit.
    pub files_changed: Vec<String>,
    /// Inserted plus deleted lines.
    pub line_count: usize,
}

impl CommitInfo {
    /// First eight characters of the hash.
    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.hash.get(..8).unwrap_or(&self.hash)
    }
}
