//! Snapshot-and-restore wrapper around document writes.

use super::fs::{DocumentFs, StdFs};
use crate::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Default suffix of the sibling backup file.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".backup";

/// What a guarded write did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// New content was written.
    Written,
    /// The mutation produced no change, nothing was written.
    Unchanged,
}

impl WriteOutcome {
    /// Returns true if the document was rewritten.
    #[must_use]
    pub const fn is_written(self) -> bool {
        matches!(self, Self::Written)
    }
}

/// The knowledge-base document and its sibling backup.
///
/// Every mutation goes through [`with_backup`](Self::with_backup): the file
/// is copied to the backup path first, and copied back if anything after
/// that fails. The backup is left in place after a successful write.
///
/// There is no locking. Two processes mutating the same path concurrently
/// can lose an update.
#[derive(Debug, Clone)]
pub struct DocumentStore<F: DocumentFs = StdFs> {
    fs: F,
    path: PathBuf,
    backup_path: PathBuf,
}

impl DocumentStore<StdFs> {
    /// Creates a store over the real file system.
    pub fn new(path: impl Into<PathBuf>, backup_suffix: &str) -> Self {
        Self::with_fs(StdFs, path, backup_suffix)
    }
}

impl<F: DocumentFs> DocumentStore<F> {
    /// Creates a store over a custom file system.
    pub fn with_fs(fs: F, path: impl Into<PathBuf>, backup_suffix: &str) -> Self {
        let path = path.into();
        let backup_path = backup_path_for(&path, backup_suffix);
        Self {
            fs,
            path,
            backup_path,
        }
    }

    /// Path of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the backup copy.
    #[must_use]
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Returns true if the document exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.fs.exists(&self.path)
    }

    /// Reads the current document text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the document cannot be read.
    pub fn read(&self) -> Result<String> {
        self.fs
            .read_to_string(&self.path)
            .map_err(|e| Error::io("read_document", &self.path, &e))
    }

    /// Runs `mutation` against the document under a backup.
    ///
    /// The mutation receives the current text and returns the new text, or
    /// `None` when there is nothing to write. If the mutation or any I/O step
    /// after the backup fails, the document is restored from the backup and
    /// the original error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the backup cannot be taken or the document
    /// cannot be read or written, or whatever error `mutation` returns.
    pub fn with_backup<M>(&self, mutation: M) -> Result<WriteOutcome>
    where
        M: FnOnce(&str) -> Result<Option<String>>,
    {
        self.fs
            .copy(&self.path, &self.backup_path)
            .map_err(|e| Error::io("backup_document", &self.path, &e))?;
        debug!(
            path = %self.path.display(),
            backup = %self.backup_path.display(),
            "Backed up document"
        );

        match self.apply(mutation) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Mutation failed, restoring document from backup"
                );
                self.restore();
                Err(err)
            },
        }
    }

    fn apply<M>(&self, mutation: M) -> Result<WriteOutcome>
    where
        M: FnOnce(&str) -> Result<Option<String>>,
    {
        let current = self.read()?;
        let Some(updated) = mutation(&current)? else {
            return Ok(WriteOutcome::Unchanged);
        };
        if updated == current {
            return Ok(WriteOutcome::Unchanged);
        }

        self.fs
            .write(&self.path, &updated)
            .map_err(|e| Error::io("write_document", &self.path, &e))?;
        debug!(
            path = %self.path.display(),
            bytes = updated.len(),
            "Wrote document"
        );
        Ok(WriteOutcome::Written)
    }

    fn restore(&self) {
        metrics::counter!("lessonkit_backup_restore_total").increment(1);
        if let Err(e) = self.fs.copy(&self.backup_path, &self.path) {
            error!(
                path = %self.path.display(),
                backup = %self.backup_path.display(),
                error = %e,
                "Failed to restore document from backup"
            );
        }
    }
}

fn backup_path_for(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
