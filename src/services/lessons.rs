//! Lesson pipelines.
//!
//! Wires extraction, classification, rendering and the merge engine to the
//! document store and a commit source.

use super::report::{
    AnalysisReport, CategoryResult, EditReport, FullAnalysisReport, LessonSource, MergeReport,
};
use crate::Result;
use crate::config::{FeatureNames, LessonkitConfig};
use crate::document::{
    DocumentStats, TakeawayEdit, append_points_to_section, insert_new_section, read_section,
    update_takeaway,
};
use crate::extraction::{ChatExtractor, CommitExtractor};
use crate::git::{CommitSource, GitCommitLog};
use crate::models::{Category, CommitInfo, LessonRecord, Point, PointDraft};
use crate::rendering::SectionRenderer;
use crate::storage::{DocumentFs, DocumentStore, StdFs, WriteOutcome};
use chrono::Utc;
use std::cell::{Cell, RefCell};
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Message reported when a section exists but has no takeaway line.
pub const MISSING_TAKEAWAY: &str = "section has no takeaway line";

/// Orchestrates the lesson pipelines against one document.
pub struct LessonsService<S: CommitSource, F: DocumentFs = StdFs> {
    store: DocumentStore<F>,
    commits: S,
    feature_names: FeatureNames,
    chat: ChatExtractor,
    commit_extractor: CommitExtractor,
    renderer: SectionRenderer,
}

impl LessonsService<GitCommitLog> {
    /// Builds a service over the configured repository and document.
    #[must_use]
    pub fn from_config(config: &LessonkitConfig) -> Self {
        Self::new(
            DocumentStore::new(config.document_path(), &config.backup_suffix),
            GitCommitLog::new(&config.project_path),
            config.feature_names.clone(),
        )
    }
}

impl<S: CommitSource, F: DocumentFs> LessonsService<S, F> {
    /// Creates a service.
    #[must_use]
    pub fn new(store: DocumentStore<F>, commits: S, feature_names: FeatureNames) -> Self {
        Self {
            store,
            commits,
            feature_names,
            chat: ChatExtractor::new(),
            commit_extractor: CommitExtractor::new(),
            renderer: SectionRenderer::new(),
        }
    }

    /// The document store.
    #[must_use]
    pub const fn store(&self) -> &DocumentStore<F> {
        &self.store
    }

    /// The commit source.
    #[must_use]
    pub const fn commits(&self) -> &S {
        &self.commits
    }

    /// Extracts lessons from a transcript and merges them.
    #[instrument(skip(self, transcript), fields(operation = "analyze_chat", bytes = transcript.len()))]
    pub fn analyze_chat(&self, transcript: &str) -> AnalysisReport {
        let records = self.chat.extract(transcript);
        record_extracted(LessonSource::Chat, records.len());
        self.merge_records(LessonSource::Chat, records, |group| {
            self.feature_names.for_chat(&contexts_of(group)).to_string()
        })
    }

    /// Extracts lessons from the last `limit` commits and merges them.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit history cannot be read.
    #[instrument(skip(self), fields(operation = "analyze_commits"))]
    pub fn analyze_commits(&self, limit: usize) -> Result<AnalysisReport> {
        let commits = self.commits.recent(limit)?;
        Ok(self.analyze_commit_list(&commits))
    }

    /// Runs the commit pipeline over an explicit commit list.
    pub fn analyze_commit_list(&self, commits: &[CommitInfo]) -> AnalysisReport {
        let records = self.commit_extractor.extract_all(commits);
        record_extracted(LessonSource::Commits, records.len());
        info!(
            commits = commits.len(),
            lessons = records.len(),
            "Analyzed commit history"
        );
        self.merge_records(LessonSource::Commits, records, |group| {
            self.feature_names.for_commits(&messages_of(group)).to_string()
        })
    }

    /// Runs the commit pipeline for one commit seen by the monitor.
    ///
    /// The lesson context doubles as the feature name.
    pub fn analyze_new_commit(&self, commit: &CommitInfo) -> AnalysisReport {
        let records: Vec<LessonRecord> = self.commit_extractor.extract(commit).into_iter().collect();
        record_extracted(LessonSource::Monitor, records.len());
        self.merge_records(LessonSource::Monitor, records, |group| {
            group
                .first()
                .map(|r| r.context.clone())
                .unwrap_or_default()
        })
    }

    /// Merges one hand-written lesson.
    #[instrument(skip(self, context, problem, solution), fields(operation = "manual", category = %category))]
    pub fn manual(
        &self,
        context: &str,
        problem: &str,
        solution: &str,
        category: Category,
    ) -> AnalysisReport {
        let record = LessonRecord::new(context, problem, solution, category);
        record_extracted(LessonSource::Manual, 1);
        self.merge_records(LessonSource::Manual, vec![record], |_| context.to_string())
    }

    /// Runs the transcript pipeline (when given) and the commit pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit history cannot be read.
    #[instrument(skip(self, transcript), fields(operation = "full_analysis"))]
    pub fn full_analysis(
        &self,
        transcript: Option<&str>,
        limit: usize,
    ) -> Result<FullAnalysisReport> {
        let chat = transcript.map(|text| self.analyze_chat(text));
        let commits = self.analyze_commits(limit)?;
        let report = FullAnalysisReport::new(chat, commits);
        info!(
            total_lessons = report.summary.total_lessons_extracted,
            document_updated = report.summary.document_updated,
            "Full analysis complete"
        );
        Ok(report)
    }

    /// Appends points to an existing section.
    #[instrument(skip(self, drafts), fields(operation = "append_points", count = drafts.len()))]
    pub fn append_points(&self, section: &str, drafts: &[PointDraft]) -> EditReport {
        let added: RefCell<Vec<Point>> = RefCell::new(Vec::new());
        let merge = self.guarded("append_points", |document| {
            let outcome = append_points_to_section(document, section, drafts)?;
            *added.borrow_mut() = outcome.points;
            Ok(Some(outcome.document))
        });

        let merge = match merge {
            Ok(WriteOutcome::Written) => MergeReport::applied(format!(
                "appended {} point(s) to '{section}'",
                added.borrow().len()
            )),
            Ok(WriteOutcome::Unchanged) => MergeReport::skipped("no points to append"),
            Err(message) => MergeReport::skipped(message),
        };
        let points = if merge.applied {
            added.into_inner()
        } else {
            Vec::new()
        };
        self.edit_report(section, merge, points)
    }

    /// Rewrites the takeaway line of an existing section.
    ///
    /// A section without a takeaway line is reported as not applied; no line
    /// is created.
    #[instrument(skip(self, takeaway), fields(operation = "update_takeaway"))]
    pub fn update_takeaway(&self, section: &str, takeaway: &str) -> EditReport {
        let missing = Cell::new(false);
        let merge = self.guarded("update_takeaway", |document| {
            match update_takeaway(document, section, takeaway)? {
                TakeawayEdit::Updated(updated) => Ok(Some(updated)),
                TakeawayEdit::Missing => {
                    missing.set(true);
                    Ok(None)
                },
            }
        });

        let merge = match merge {
            Ok(_) if missing.get() => MergeReport::skipped(MISSING_TAKEAWAY),
            Ok(WriteOutcome::Written) => {
                MergeReport::applied(format!("updated takeaway of '{section}'"))
            },
            Ok(WriteOutcome::Unchanged) => MergeReport::skipped("takeaway already up to date"),
            Err(message) => MergeReport::skipped(message),
        };
        self.edit_report(section, merge, Vec::new())
    }

    /// Collects statistics over the current document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    pub fn stats(&self) -> Result<DocumentStats> {
        let document = self.store.read()?;
        Ok(DocumentStats::collect(&document))
    }

    /// HEAD of the commit source.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn head(&self) -> Result<Option<String>> {
        self.commits.head()
    }

    fn merge_records<N>(
        &self,
        source: LessonSource,
        records: Vec<LessonRecord>,
        feature_name: N,
    ) -> AnalysisReport
    where
        N: Fn(&[LessonRecord]) -> String,
    {
        let mut report = AnalysisReport::empty(source);
        for (category, group) in group_by_category(records) {
            let feature = feature_name(&group);
            let formatted = self.renderer.render(&group, category, &feature, 1);
            let merge = self.merge_section(&formatted, category);
            report.categories.push(CategoryResult {
                category,
                feature_name: feature,
                lesson_count: group.len(),
                formatted_section: formatted,
                lessons: group,
                merge,
            });
        }
        report
    }

    fn merge_section(&self, formatted: &str, category: Category) -> MergeReport {
        let merge = self.guarded("insert_section", |document| {
            Ok(Some(insert_new_section(document, formatted, category)))
        });
        match merge {
            Ok(WriteOutcome::Written) => MergeReport::applied(format!(
                "added {category} section to {}",
                self.store.path().display()
            )),
            Ok(WriteOutcome::Unchanged) => MergeReport::skipped("nothing to merge"),
            Err(message) => MergeReport::skipped(message),
        }
    }

    /// Runs a guarded write and records its metrics. Failures are turned
    /// into a message; the store has already restored the document.
    fn guarded<M>(&self, operation: &'static str, mutation: M) -> std::result::Result<WriteOutcome, String>
    where
        M: FnOnce(&str) -> Result<Option<String>>,
    {
        let start = Instant::now();
        let result = self.store.with_backup(mutation);

        let status = if result.is_ok() { "success" } else { "error" };
        metrics::counter!("lessonkit_merge_total", "operation" => operation, "status" => status)
            .increment(1);
        metrics::histogram!("lessonkit_merge_duration_ms", "operation" => operation)
            .record(start.elapsed().as_secs_f64() * 1000.0);

        result.map_err(|e| {
            warn!(operation, error = %e, "Merge failed");
            e.to_string()
        })
    }

    fn edit_report(&self, section: &str, merge: MergeReport, points: Vec<Point>) -> EditReport {
        let updated_section = if merge.applied {
            self.store
                .read()
                .ok()
                .and_then(|document| read_section(&document, section).ok())
        } else {
            None
        };

        EditReport {
            timestamp: Utc::now(),
            section: section.to_string(),
            merge,
            points,
            updated_section,
        }
    }
}

/// Groups records by category, keeping first-seen category order and
/// record order within each group.
#[must_use]
pub fn group_by_category(records: Vec<LessonRecord>) -> Vec<(Category, Vec<LessonRecord>)> {
    let mut groups: Vec<(Category, Vec<LessonRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(c, _)| *c == record.category) {
            Some((_, group)) => group.push(record),
            None => groups.push((record.category, vec![record])),
        }
    }
    groups
}

/// Contexts of a category group, used to name its section.
fn contexts_of(group: &[LessonRecord]) -> String {
    group
        .iter()
        .map(|r| r.context.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Commit messages of a category group, used to name its section.
fn messages_of(group: &[LessonRecord]) -> String {
    group
        .iter()
        .filter_map(|r| r.evidence.commit_message.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
}

fn record_extracted(source: LessonSource, count: usize) {
    let source = match source {
        LessonSource::Chat => "chat",
        LessonSource::Commits => "commits",
        LessonSource::Manual => "manual",
        LessonSource::Monitor => "monitor",
    };
    metrics::counter!("lessonkit_lessons_extracted_total", "source" => source)
        .increment(u64::try_from(count).unwrap_or(u64::MAX));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: Category, context: &str) -> LessonRecord {
        LessonRecord::new(context, "p", "s", category)
    }

    #[test]
    fn test_group_by_category_first_seen() {
        let groups = group_by_category(vec![
            record(Category::Navigation, "a"),
            record(Category::UiLayout, "b"),
            record(Category::Navigation, "c"),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Category::Navigation);
        let contexts: Vec<&str> = groups[0].1.iter().map(|r| r.context.as_str()).collect();
        assert_eq!(contexts, vec!["a", "c"]);
        assert_eq!(groups[1].0, Category::UiLayout);
    }

    #[test]
    fn test_group_text_for_feature_names() {
        let mut commit = record(Category::BuildCompilation, "xcode");
        commit.evidence.commit_message = Some("fix: build failed".to_string());
        let group = vec![record(Category::UiLayout, "team wizard"), commit];

        assert_eq!(contexts_of(&group), "team wizard xcode");
        assert_eq!(messages_of(&group), "fix: build failed");
        assert_eq!(messages_of(&[]), "");
    }

    #[test]
    fn test_group_by_category_empty() {
        assert!(group_by_category(Vec::new()).is_empty());
    }
}
