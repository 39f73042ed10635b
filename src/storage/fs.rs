//! File-system capability used by the document store.

use std::fs;
use std::io;
use std::path::Path;

/// File operations needed to read, back up and rewrite the document.
///
/// Implementations return raw `io::Error`s; the store attaches the
/// operation name and path.
pub trait DocumentFs: Send + Sync {
    /// Reads a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replaces the contents of a file.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Copies `from` over `to`.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Returns true if `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

/// [`DocumentFs`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl DocumentFs for StdFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
