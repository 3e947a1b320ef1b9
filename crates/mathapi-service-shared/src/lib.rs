//! Shared HTTP infrastructure for the mathapi evaluation service.
//!
//! This crate provides the HTTP glue around `mathapi-lib`:
//!
//! - [`AppState`]: The evaluator shared by all handlers
//! - [`ApiResponse`]: The `{result, error}` JSON envelope
//! - [`ServiceError`]: Error taxonomy and its HTTP status mapping
//! - [`ServiceResponse`]: Plain-text and JSON success responses
//! - [`health`]: Health check handler
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking, metrics, CORS and panic layers
//! - [`ServiceConfig`]: Listener configuration
//! - Request types with validation for both evaluation transports
//!
//! # Architecture
//!
//! Handlers stay thin; evaluation and formatting live in `mathapi-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse query string / JSON body                           │
//! │  - Validate parameters                                      │
//! │  - Call the evaluator and mathapi-lib formatting            │
//! │  - Render text or envelope                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides state fixtures and a stub evaluator.
//! Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod config;
mod envelope;
mod error;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ServiceConfig, DEFAULT_PORT};
pub use envelope::{
    ApiResponse, ENDPOINT_NOT_FOUND, EXPR_NOT_A_STRING, INTERNAL_SERVER_ERROR, MISSING_EXPR,
    URI_MALFORMED,
};
pub use error::{panic_response, ServiceError};
pub use health::{health, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_evaluation, record_evaluation_failed, MetricsConfig,
    MetricsError,
};
pub use middleware::{
    catch_panic_layer, cors_layer, extract_or_generate_request_id, MetricsLayer, RequestId,
    REQUEST_ID_HEADER,
};
pub use request::{
    decode_component, is_form_content_type, parse_precision, EvaluateBody, EvaluateQuery,
    EvaluationRequest, Validate,
};
pub use response::{ServiceResponse, TEXT_PLAIN};
pub use state::AppState;
