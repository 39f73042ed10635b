//! Log filter resolution and file output.

use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Directive used when `--verbose` is given and `RUST_LOG` is unset.
pub const VERBOSE_FILTER: &str = "debug";

/// Picks the filter directive.
///
/// `RUST_LOG` wins over `--verbose`, which wins over the configured filter
/// (itself already overridden by `LESSONKIT_LOG`).
#[must_use]
pub fn resolve_filter(configured: &str, verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directive) => directive.to_string(),
        None if verbose => VERBOSE_FILTER.to_string(),
        None => configured.to_string(),
    }
}

/// Builds an `EnvFilter` from a directive.
///
/// # Errors
///
/// Returns an error if the directive does not parse.
pub fn build_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| Error::OperationFailed {
        operation: "parse_log_filter".to_string(),
        cause: format!("{directive}: {e}"),
    })
}

/// Thread-safe file writer for logging.
#[derive(Clone)]
pub struct LogFileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?;
        guard.flush()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogFileWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Opens a log file for appending, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
pub fn open_log_file(path: &Path) -> Result<LogFileWriter> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
            operation: "create_log_dir".to_string(),
            cause: e.to_string(),
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::OperationFailed {
            operation: "open_log_file".to_string(),
            cause: format!("{}: {}", path.display(), e),
        })?;

    Ok(LogFileWriter {
        file: Arc::new(Mutex::new(file)),
    })
}
