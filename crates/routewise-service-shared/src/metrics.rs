//! Prometheus metrics for routewise services.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Initialize the Prometheus metrics recorder
//! - [`metrics_handler`]: Axum handler for `/metrics` endpoint
//! - Business metric helpers for route resolution and link creation
//!
//! Recording before [`init_metrics`] (or with metrics disabled) is a no-op.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use routewise_lib::{Error as LibError, WeightSelector};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: Path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let path = std::env::var("METRICS_PATH").unwrap_or_else(|_| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus recorder.
///
/// # Errors
///
/// Returns an error if metrics are disabled, the recorder is already
/// installed, or installation fails.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Axum handler for the `/metrics` endpoint.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    Disabled,
    /// The recorder has already been installed.
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Increment `routewise_routes_calculated_total` for one resolved criterion.
pub fn record_route_calculated(criterion: WeightSelector) {
    metrics::counter!(
        "routewise_routes_calculated_total",
        "criterion" => criterion.to_string()
    )
    .increment(1);
}

/// Increment `routewise_routes_failed_total`.
///
/// `reason` is a short label such as `validation_error`, `unknown_location`
/// or `no_path`; see [`failure_reason`].
pub fn record_route_failed(reason: &str) {
    metrics::counter!(
        "routewise_routes_failed_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Record the hop count of a resolved path in `routewise_route_hops`.
pub fn record_route_hops(hops: usize, criterion: WeightSelector) {
    metrics::histogram!(
        "routewise_route_hops",
        "criterion" => criterion.to_string()
    )
    .record(hops as f64);
}

/// Increment `routewise_links_created_total`.
pub fn record_link_created(mode: &str) {
    metrics::counter!(
        "routewise_links_created_total",
        "mode" => mode.to_string()
    )
    .increment(1);
}

/// Metric label describing why a library call failed.
pub fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::UnknownLocation { .. } => "unknown_location",
        LibError::SameEndpoint { .. }
        | LibError::InvalidDistance { .. }
        | LibError::InvalidMode { .. }
        | LibError::InvalidStrategy { .. } => "validation_error",
        LibError::RouteNotFound { .. } => "no_path",
        LibError::DatabaseNotFound { .. } => "database_unavailable",
        LibError::MalformedLink { .. } => "malformed_network",
        _ => "internal_error",
    }
}
