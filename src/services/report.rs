//! JSON reports printed by the command surface.

use crate::models::{Category, LessonRecord, Point, Section};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where a batch of lessons came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonSource {
    /// A chat transcript.
    Chat,
    /// Recent commit history.
    Commits,
    /// A single record given on the command line.
    Manual,
    /// A new HEAD seen by the commit monitor.
    Monitor,
}

/// Outcome of one guarded document write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Whether the document was changed.
    pub applied: bool,
    /// Human-readable outcome.
    pub message: String,
}

impl MergeReport {
    /// A merge that changed the document.
    #[must_use]
    pub fn applied(message: impl Into<String>) -> Self {
        Self {
            applied: true,
            message: message.into(),
        }
    }

    /// A merge that did not change the document.
    #[must_use]
    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            applied: false,
            message: message.into(),
        }
    }
}

/// Lessons of one category from one analysis, and what merging them did.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResult {
    /// Category shared by the lessons.
    pub category: Category,
    /// Feature name used in the section heading.
    pub feature_name: String,
    /// Number of lessons.
    pub lesson_count: usize,
    /// The rendered markdown section.
    pub formatted_section: String,
    /// The lessons themselves.
    pub lessons: Vec<LessonRecord>,
    /// Merge outcome.
    pub merge: MergeReport,
}

/// Result of analysing one source.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// When the analysis ran.
    pub timestamp: DateTime<Utc>,
    /// Lesson source.
    pub source: LessonSource,
    /// Per-category results in first-seen order. Empty when nothing was
    /// extracted.
    pub categories: Vec<CategoryResult>,
}

impl AnalysisReport {
    /// A report with no lessons.
    #[must_use]
    pub fn empty(source: LessonSource) -> Self {
        Self {
            timestamp: Utc::now(),
            source,
            categories: Vec::new(),
        }
    }

    /// Total lessons across categories.
    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.categories.iter().map(|c| c.lesson_count).sum()
    }

    /// Categories in report order.
    #[must_use]
    pub fn category_list(&self) -> Vec<Category> {
        self.categories.iter().map(|c| c.category).collect()
    }

    /// Whether any merge changed the document.
    #[must_use]
    pub fn document_updated(&self) -> bool {
        self.categories.iter().any(|c| c.merge.applied)
    }
}

/// Totals across a full analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    /// Lessons from both sources.
    pub total_lessons_extracted: usize,
    /// Categories found in the transcript.
    pub chat_categories: Vec<Category>,
    /// Categories found in the commits.
    pub commit_categories: Vec<Category>,
    /// Whether any merge changed the document.
    pub document_updated: bool,
}

/// Result of `full-analysis`.
#[derive(Debug, Clone, Serialize)]
pub struct FullAnalysisReport {
    /// When the analysis ran.
    pub timestamp: DateTime<Utc>,
    /// Transcript analysis, when a transcript was given.
    pub chat: Option<AnalysisReport>,
    /// Commit analysis.
    pub commits: AnalysisReport,
    /// Totals.
    pub summary: AnalysisSummary,
}

impl FullAnalysisReport {
    /// Builds the report and its summary.
    #[must_use]
    pub fn new(chat: Option<AnalysisReport>, commits: AnalysisReport) -> Self {
        let chat_lessons = chat.as_ref().map_or(0, AnalysisReport::lesson_count);
        let summary = AnalysisSummary {
            total_lessons_extracted: chat_lessons + commits.lesson_count(),
            chat_categories: chat
                .as_ref()
                .map(AnalysisReport::category_list)
                .unwrap_or_default(),
            commit_categories: commits.category_list(),
            document_updated: chat.as_ref().is_some_and(AnalysisReport::document_updated)
                || commits.document_updated(),
        };

        Self {
            timestamp: Utc::now(),
            chat,
            commits,
            summary,
        }
    }
}

/// Result of a direct edit to one section.
#[derive(Debug, Clone, Serialize)]
pub struct EditReport {
    /// When the edit ran.
    pub timestamp: DateTime<Utc>,
    /// Requested section name.
    pub section: String,
    /// Merge outcome.
    pub merge: MergeReport,
    /// Points added by the edit, as numbered.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
    /// The section as it reads after a successful edit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_section: Option<Section>,
}
