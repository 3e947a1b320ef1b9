//! The `{result, error}` JSON envelope.
//!
//! Every JSON response of the evaluation API carries exactly one populated
//! field: `result` on success, `error` on failure. The other is serialized as
//! an explicit `null`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error text for a request without an `expr` parameter.
pub const MISSING_EXPR: &str = "Missing required parameter: expr";

/// Error text for unroutable requests.
pub const ENDPOINT_NOT_FOUND: &str = "Endpoint not found. Use GET or POST to /v4/";

/// Error text for unexpected server faults.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Error text for an `expr` that does not percent-decode to UTF-8.
pub const URI_MALFORMED: &str = "URI malformed";

/// Error text for a JSON `expr` that is not a string.
pub const EXPR_NOT_A_STRING: &str = "Parameter expr must be a string";

/// JSON response body shared by success and failure responses.
///
/// # Example
///
/// ```
/// use mathapi_service_shared::ApiResponse;
///
/// let ok = ApiResponse::success("4");
/// assert_eq!(
///     serde_json::to_string(&ok).unwrap(),
///     r#"{"result":"4","error":null}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse {
    /// Formatted evaluation result, set on success.
    pub result: Option<String>,

    /// Human-readable failure message, set on failure.
    pub error: Option<String>,
}

impl ApiResponse {
    /// Envelope for a successful evaluation.
    pub fn success(result: impl Into<String>) -> Self {
        Self {
            result: Some(result.into()),
            error: None,
        }
    }

    /// Envelope for a failed request.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(error.into()),
        }
    }

    /// Whether this envelope reports success.
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    /// Pair the envelope with a status code to build an HTTP response.
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = if self.is_success() {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        };
        self.with_status(status)
    }
}
