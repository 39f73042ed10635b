//! # Lessonkit
//!
//! Turns "problem → solution" narratives into a living project knowledge base.
//!
//! Lessons are extracted from chat transcripts and git commit history,
//! classified into a fixed set of categories, rendered as markdown sections
//! and merged into a human-maintained document (usually `CLAUDE.md`).
//!
//! ## Pipeline
//!
//! ```text
//! raw text ─▶ extraction ─▶ classifier ─▶ rendering ─▶ document merge ─▶ storage
//! ```
//!
//! Everything up to the merge engine is a pure transform. The merge engine
//! works on document text passed in by value, and only [`storage`] touches
//! the file system, always behind a backup-and-restore guard.
//!
//! ## Example
//!
//! ```rust,ignore
//! use lessonkit::document::insert_new_section;
//! use lessonkit::extraction::ChatExtractor;
//! use lessonkit::rendering::SectionRenderer;
//!
//! let records = ChatExtractor::new().extract(transcript);
//! let section = SectionRenderer::new().render(&records, records[0].category, "Team Wizard", 1);
//! let updated = insert_new_section(&document, &section, records[0].category);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use thiserror::Error as ThisError;

// Module declarations
pub mod classifier;
pub mod config;
pub mod document;
pub mod extraction;
pub mod git;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::LessonkitConfig;
pub use models::{Category, CommitInfo, Evidence, LessonRecord, Point, PointDraft, Section};
pub use services::{CommitMonitor, LessonsService};

/// Error type for lessonkit operations.
///
/// Extraction, classification and rendering are total functions and never
/// produce errors. Only the merge engine, the persistence guard and the
/// collaborators around them (git, configuration) can fail.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed command input, e.g. a point without a title |
/// | `SectionNotFound` | No `###` heading matches the requested section name |
/// | `Io` | Reading or writing the document or its backup fails |
/// | `OperationFailed` | Git, configuration or logging setup fails |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested section is absent from the document.
    ///
    /// No mutation happens when this is raised.
    #[error("section '{section}' not found")]
    SectionNotFound {
        /// The section name that was searched for.
        section: String,
    },

    /// A file-system operation on the document or its backup failed.
    ///
    /// Raised inside the persistence guard, which restores the document
    /// from its backup before surfacing the error.
    #[error("I/O failure during '{operation}' on {}: {cause}", path.display())]
    Io {
        /// The operation that failed.
        operation: String,
        /// The path involved.
        path: PathBuf,
        /// The underlying cause.
        cause: String,
    },

    /// An operation outside the document store failed.
    ///
    /// Raised when:
    /// - the git repository cannot be opened or walked
    /// - the configuration file cannot be read or parsed
    /// - the logging subscriber cannot be installed
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Builds an [`Error::Io`] from an `std::io::Error`.
    pub fn io(operation: &str, path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            operation: operation.to_string(),
            path: path.into(),
            cause: err.to_string(),
        }
    }
}

/// Result type alias for lessonkit operations.
pub type Result<T> = std::result::Result<T, Error>;
