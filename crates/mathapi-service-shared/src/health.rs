//! Health check handler.
//!
//! `GET /health` reports liveness with a timestamp. The service holds no
//! external resources, so there is no separate readiness state.

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Health status response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Status indicator, always "OK" while the process serves requests.
    pub status: String,

    /// Current time in ISO-8601 (UTC, millisecond precision).
    pub timestamp: String,
}

impl HealthStatus {
    /// Create a healthy status stamped with the current time.
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Health handler.
///
/// # Example
///
/// ```text
/// GET /health
/// {"status":"OK","timestamp":"2026-10-16T09:30:00.123Z"}
/// ```
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthStatus::ok()))
}
