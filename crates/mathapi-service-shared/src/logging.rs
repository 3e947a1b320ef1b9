//! Structured logging for the mathapi service.
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: `json` (default) or `text` / `pretty`
//! - `RUST_LOG`: Log level filter (default: `info`)
//! - `SERVICE_NAME`: Name reported in the startup log line (optional)
//!
//! # Example
//!
//! ```no_run
//! use mathapi_service_shared::logging::{LoggingConfig, init_logging};
//!
//! let config = LoggingConfig::from_env().with_service("mathapi");
//! init_logging(&config);
//! ```

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logging (default, production).
    #[default]
    Json,
    /// Human-readable text logging (development).
    Text,
}

impl FromStr for LogFormat {
    type Err = Infallible;

    /// Accepts "text" or "pretty" (case-insensitive) for text output; anything
    /// else selects JSON.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        })
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format (json or text).
    pub format: LogFormat,
    /// Fallback level filter when `RUST_LOG` is not set (e.g. "info").
    pub level: String,
    /// Service name for the startup log line.
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("LOG_FORMAT").ok().as_deref(),
            std::env::var("RUST_LOG").ok().as_deref(),
            std::env::var("SERVICE_NAME").ok().as_deref(),
        )
    }

    /// Build configuration from raw variable values.
    pub fn from_vars(format: Option<&str>, level: Option<&str>, service: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            format: format
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.format),
            level: level
                .filter(|l| !l.trim().is_empty())
                .map(String::from)
                .unwrap_or(defaults.level),
            service: service.map(String::from),
        }
    }

    /// Set the service name unless one came from the environment.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service.get_or_insert_with(|| service.into());
        self
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Call once at startup.
///
/// # JSON Format (default)
///
/// ```json
/// {"timestamp":"2026-10-16T10:00:00.000Z","level":"INFO","fields":{"message":"listening","addr":"0.0.0.0:3000"},"target":"mathapi_service"}
/// ```
///
/// # Text Format (development)
///
/// ```text
/// 2026-10-16T10:00:00.000Z  INFO mathapi_service: listening, addr: 0.0.0.0:3000
/// ```
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .init(),
    }

    tracing::info!(
        service = config.service.as_deref().unwrap_or("mathapi"),
        format = ?config.format,
        "logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("unknown".parse::<LogFormat>().unwrap(), LogFormat::Json);
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
        assert!(config.service.is_none());
    }

    #[test]
    fn test_logging_config_from_vars() {
        let config = LoggingConfig::from_vars(Some("text"), Some("debug"), Some("calc"));
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.level, "debug");
        assert_eq!(config.service.as_deref(), Some("calc"));

        let config = LoggingConfig::from_vars(None, Some("  "), None);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_with_service_keeps_environment_value() {
        let config = LoggingConfig::default().with_service("mathapi");
        assert_eq!(config.service.as_deref(), Some("mathapi"));

        let config = LoggingConfig::from_vars(None, None, Some("calc")).with_service("mathapi");
        assert_eq!(config.service.as_deref(), Some("calc"));
    }
}
