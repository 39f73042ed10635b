//! Business logic services.
//!
//! Services run the lesson pipelines against the document store and report
//! every merge outcome instead of failing the whole run.

mod lessons;
mod monitor;
mod report;

pub use lessons::{LessonsService, MISSING_TAKEAWAY, group_by_category};
pub use monitor::CommitMonitor;
pub use report::{
    AnalysisReport, AnalysisSummary, CategoryResult, EditReport, FullAnalysisReport,
    LessonSource, MergeReport,
};
