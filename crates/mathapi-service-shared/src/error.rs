//! Service-level errors and their HTTP mapping.
//!
//! Client mistakes (missing parameters, bad bodies, rejected expressions) map
//! to 400 with a message the client can act on. Unroutable requests map to 404.
//! Internal faults map to 500 with a generic message; their detail is logged
//! and never sent to the client.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::envelope::{
    ApiResponse, ENDPOINT_NOT_FOUND, EXPR_NOT_A_STRING, INTERNAL_SERVER_ERROR, MISSING_EXPR,
    URI_MALFORMED,
};
use mathapi_lib::Error as LibError;

/// Errors surfaced by the evaluation API handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The `expr` parameter was absent or empty.
    #[error("{}", MISSING_EXPR)]
    MissingExpression,

    /// The `expr` parameter was present in a JSON body but not as a string.
    #[error("{}", EXPR_NOT_A_STRING)]
    ExpressionNotString,

    /// The `expr` query parameter did not percent-decode to valid UTF-8.
    #[error("{}", URI_MALFORMED)]
    MalformedUri,

    /// The query string could not be parsed.
    #[error("{0}")]
    MalformedRequest(String),

    /// The evaluator rejected the expression; the message is passed through.
    #[error("{0}")]
    Evaluation(String),

    /// No route matched the request.
    #[error("{}", ENDPOINT_NOT_FOUND)]
    NotFound,

    /// Unexpected server fault. The detail is for logs only.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Short machine-friendly label used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingExpression | Self::ExpressionNotString | Self::MalformedUri => {
                "validation_error"
            }
            Self::MalformedRequest(_) => "malformed_request",
            Self::Evaluation(_) => "evaluation_error",
            Self::NotFound => "not_found",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Message sent to the client.
    pub fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => INTERNAL_SERVER_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<LibError> for ServiceError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::Evaluation { message } => Self::Evaluation(message),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            error!(error = %detail, "unhandled error while serving request");
        }
        ApiResponse::failure(self.client_message()).with_status(self.status())
    }
}

/// Response for a handler that panicked.
///
/// Used with `tower_http::catch_panic::CatchPanicLayer`. The panic payload is
/// logged and the client receives the generic 500 envelope.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ServiceError::Internal(format!("handler panicked: {}", detail)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServiceError::MissingExpression.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Evaluation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServiceError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_message_hides_internal_detail() {
        let err = ServiceError::Internal("database exploded".into());
        assert_eq!(err.client_message(), INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("database exploded"));
    }

    #[test]
    fn test_evaluation_message_passes_through() {
        let err = ServiceError::from(LibError::evaluation("Unexpected token at byte 3."));
        assert_eq!(err.client_message(), "Unexpected token at byte 3.");
        assert_eq!(err.reason(), "evaluation_error");
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            ServiceError::MissingExpression.client_message(),
            "Missing required parameter: expr"
        );
        assert_eq!(
            ServiceError::NotFound.client_message(),
            "Endpoint not found. Use GET or POST to /v4/"
        );
    }

    #[test]
    fn test_panic_response_is_generic_500() {
        let response = panic_response(Box::new("secret detail"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
