//! Prometheus metrics for the mathapi service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Install the Prometheus recorder
//! - [`metrics_handler`]: Axum handler rendering the exposition text
//! - Evaluation counters recorded by the `/v4/` handlers
//!
//! The `/metrics` route is opt-in (`METRICS_ENABLED=true`) so the public
//! route table of the evaluation API stays unchanged by default.
//!
//! # Example
//!
//! ```no_run
//! use mathapi_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! let config = MetricsConfig { enabled: true, ..MetricsConfig::default() };
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new()
//!     .route(&config.path, get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection and the metrics route are enabled.
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "1" to enable (default: disabled)
    /// - `METRICS_PATH`: Path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("METRICS_ENABLED").ok().as_deref(),
            std::env::var("METRICS_PATH").ok().as_deref(),
        )
    }

    /// Build configuration from raw variable values.
    pub fn from_vars(enabled: Option<&str>, path: Option<&str>) -> Self {
        let enabled = enabled
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let path = path
            .filter(|p| p.starts_with('/'))
            .map(String::from)
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus metrics recorder.
///
/// Must be called once at startup before any metrics are recorded.
///
/// # Errors
///
/// Returns an error if metrics are disabled, the recorder was already
/// installed, or the Prometheus builder fails.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Axum handler for the metrics endpoint.
///
/// Returns Prometheus exposition format text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    #[error("metrics are disabled")]
    Disabled,
    /// The recorder has already been installed.
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

/// Record a successful evaluation.
///
/// Increments `mathapi_evaluations_total`.
///
/// * `method` - The HTTP method of the evaluation endpoint ("GET" or "POST")
pub fn record_evaluation(method: &str) {
    metrics::counter!(
        "mathapi_evaluations_total",
        "method" => method.to_string()
    )
    .increment(1);
}

/// Record a failed evaluation request.
///
/// Increments `mathapi_evaluations_failed_total`.
///
/// * `method` - The HTTP method of the evaluation endpoint
/// * `reason` - Failure label, e.g. "validation_error" or "evaluation_error"
pub fn record_evaluation_failed(method: &str, reason: &str) {
    metrics::counter!(
        "mathapi_evaluations_failed_total",
        "method" => method.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_metrics_config_from_vars() {
        assert!(MetricsConfig::from_vars(Some("true"), None).enabled);
        assert!(MetricsConfig::from_vars(Some("1"), None).enabled);
        assert!(!MetricsConfig::from_vars(Some("false"), None).enabled);
        assert!(!MetricsConfig::from_vars(None, None).enabled);

        assert_eq!(
            MetricsConfig::from_vars(None, Some("/prom")).path,
            "/prom"
        );
        assert_eq!(
            MetricsConfig::from_vars(None, Some("no-slash")).path,
            "/metrics"
        );
    }

    #[test]
    fn test_init_metrics_disabled() {
        let result = init_metrics(&MetricsConfig::default());
        assert!(matches!(result, Err(MetricsError::Disabled)));
    }

    #[test]
    fn test_metrics_handler_returns_prometheus_format() {
        // The recorder is global; only the uninitialized rendering is checked here.
        let rt = tokio::runtime::Runtime::new().unwrap();
        let output = rt.block_on(async { metrics_handler().await });
        assert!(output.contains('#') || output.is_empty());
    }

    #[test]
    fn test_evaluation_counters_record_without_recorder() {
        record_evaluation("GET");
        record_evaluation("POST");
        record_evaluation_failed("GET", "validation_error");
        record_evaluation_failed("POST", "evaluation_error");
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert_eq!(
            MetricsError::AlreadyInitialized.to_string(),
            "metrics recorder already initialized"
        );
        assert!(MetricsError::InstallFailed("boom".to_string())
            .to_string()
            .contains("boom"));
    }
}
