//! Git operations.
//!
//! Commit history is consumed through [`CommitSource`], so the pipelines
//! can be driven by a fixed commit list in tests.

mod log;

pub use log::GitCommitLog;

use crate::Result;
use crate::models::CommitInfo;

/// Producer of structured commit records.
pub trait CommitSource: Send + Sync {
    /// Returns up to `limit` commits reachable from HEAD, newest first.
    ///
    /// A repository without commits yields an empty list.
    fn recent(&self, limit: usize) -> Result<Vec<CommitInfo>>;

    /// Returns the full hash HEAD points to, or `None` before the first commit.
    fn head(&self) -> Result<Option<String>>;

    /// Resolves a revision (full or abbreviated hash, `HEAD`, ...) to a commit.
    fn commit(&self, rev: &str) -> Result<CommitInfo>;
}
