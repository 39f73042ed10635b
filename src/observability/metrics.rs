//! Prometheus metrics.
//!
//! Counters and histograms are recorded through the `metrics` facade all
//! over the crate. Without an installed recorder they are no-ops. When
//! enabled, a Prometheus recorder collects them in memory and the rendered
//! exposition text is logged at shutdown.

use crate::{Error, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Metrics handle for rendering on shutdown.
#[derive(Debug, Clone)]
pub struct MetricsHandle {
    prometheus: PrometheusHandle,
}

impl MetricsHandle {
    /// Renders the current metric values in Prometheus text format.
    #[must_use]
    pub fn render(&self) -> String {
        self.prometheus.render()
    }
}

/// Installs the Prometheus recorder as the global `metrics` recorder.
///
/// Returns `None` when metrics are disabled.
///
/// # Errors
///
/// Returns an error if a global recorder is already installed.
pub fn install_prometheus(enabled: bool) -> Result<Option<MetricsHandle>> {
    if !enabled {
        return Ok(None);
    }

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| Error::OperationFailed {
            operation: "metrics_recorder_install".to_string(),
            cause: e.to_string(),
        })?;

    Ok(Some(MetricsHandle { prometheus }))
}

/// Logs the rendered metrics.
pub fn flush(handle: &MetricsHandle) {
    let payload = handle.render();
    if payload.trim().is_empty() {
        tracing::debug!("No metrics recorded");
        return;
    }
    tracing::info!(bytes = payload.len(), metrics = %payload, "Metrics snapshot");
}
