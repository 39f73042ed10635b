//! Observability and telemetry.
//!
//! Sets up the `tracing` subscriber and the optional Prometheus recorder.
//! Logs always go to stderr or a log file, never stdout, which carries the
//! JSON reports.

mod logging;
mod metrics;

pub use logging::{LogFileWriter, VERBOSE_FILTER, build_filter, open_log_file, resolve_filter};
pub use metrics::{MetricsHandle, flush as flush_metrics, install_prometheus};

use crate::config::{LessonkitConfig, LogFormat};
use crate::{Error, Result};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Full observability configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log output format.
    pub format: LogFormat,
    /// Filter directive.
    pub filter: String,
    /// Optional log file.
    pub file: Option<PathBuf>,
    /// Whether to install the Prometheus recorder.
    pub metrics_enabled: bool,
}

/// Options from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Whether verbose output was requested.
    pub verbose: bool,
}

/// Handle for observability runtime components.
#[derive(Debug)]
pub struct ObservabilityHandle {
    metrics_handle: Option<MetricsHandle>,
}

static OBSERVABILITY_INIT: OnceLock<()> = OnceLock::new();

impl ObservabilityHandle {
    /// Logs the metrics snapshot, if metrics are enabled.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.metrics_handle.take() {
            metrics::flush(&handle);
        }
    }
}

impl Drop for ObservabilityHandle {
    fn drop(&mut self) {
        if self.metrics_handle.is_some() {
            self.shutdown();
        }
    }
}

/// Builds the observability configuration from settings and CLI options.
#[must_use]
pub fn build_config(settings: &LessonkitConfig, options: InitOptions) -> ObservabilityConfig {
    let rust_log = std::env::var("RUST_LOG").ok();
    ObservabilityConfig {
        format: settings.logging.format,
        filter: resolve_filter(
            &settings.logging.filter,
            options.verbose,
            rust_log.as_deref(),
        ),
        file: settings.logging.file.clone(),
        metrics_enabled: settings.metrics.enabled,
    }
}

/// Initializes observability from config settings.
///
/// # Errors
///
/// Returns an error if observability has already been initialized or if any
/// component fails to initialize.
pub fn init_from_config(
    settings: &LessonkitConfig,
    options: InitOptions,
) -> Result<ObservabilityHandle> {
    init(build_config(settings, options))
}

/// Initializes logging and metrics for the process.
///
/// # Errors
///
/// Returns an error if observability has already been initialized or if any
/// component fails to initialize.
pub fn init(config: ObservabilityConfig) -> Result<ObservabilityHandle> {
    if OBSERVABILITY_INIT.get().is_some() {
        return Err(Error::OperationFailed {
            operation: "observability_init".to_string(),
            cause: "observability already initialized".to_string(),
        });
    }

    let filter = build_filter(&config.filter)?;
    let (writer, ansi) = match &config.file {
        Some(path) => (BoxMakeWriter::new(open_log_file(path)?), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true),
                )
                .with(filter)
                .try_init()
                .map_err(init_error)?;
        },
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(ansi)
                        .with_target(true),
                )
                .with(filter)
                .try_init()
                .map_err(init_error)?;
        },
    }

    let metrics_handle = install_prometheus(config.metrics_enabled)?;

    OBSERVABILITY_INIT
        .set(())
        .map_err(|()| Error::OperationFailed {
            operation: "observability_init".to_string(),
            cause: "failed to mark observability initialized".to_string(),
        })?;

    Ok(ObservabilityHandle { metrics_handle })
}

/// Helper to convert init errors.
#[allow(clippy::needless_pass_by_value)]
fn init_error(e: tracing_subscriber::util::TryInitError) -> Error {
    Error::OperationFailed {
        operation: "observability_init".to_string(),
        cause: e.to_string(),
    }
}
