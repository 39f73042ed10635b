//! Document persistence.
//!
//! The only module that touches the knowledge-base file. Reads go straight
//! through; writes go through [`DocumentStore::with_backup`], which copies
//! the file to a sibling backup before mutating it and copies it back if the
//! mutation or the write fails.

mod fs;
mod guard;

pub use fs::{DocumentFs, StdFs};
pub use guard::{DEFAULT_BACKUP_SUFFIX, DocumentStore, WriteOutcome};
