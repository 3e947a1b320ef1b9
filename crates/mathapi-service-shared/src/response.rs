//! Success responses for the evaluation endpoints.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::ApiResponse;

/// Content type of the GET plain-text result.
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// A successful evaluation response.
///
/// GET answers with the bare formatted result as `text/plain`, matching the
/// legacy API; POST wraps it in the JSON [`ApiResponse`] envelope.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResponse {
    /// Plain-text body containing only the formatted result.
    Text(String),
    /// JSON envelope `{"result": ..., "error": null}`.
    Json(ApiResponse),
}

impl ServiceResponse {
    /// Plain-text success response.
    pub fn text(result: impl Into<String>) -> Self {
        Self::Text(result.into())
    }

    /// JSON envelope success response.
    pub fn json(result: impl Into<String>) -> Self {
        Self::Json(ApiResponse::success(result))
    }
}

impl IntoResponse for ServiceResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Text(text) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN))],
                text,
            )
                .into_response(),
            Self::Json(envelope) => envelope.with_status(StatusCode::OK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_response_content_type() {
        let response = ServiceResponse::text("4").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            TEXT_PLAIN
        );
    }

    #[test]
    fn test_json_response_content_type() {
        let response = ServiceResponse::json("4").into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_text_response_body_is_bare_result() {
        assert_eq!(
            ServiceResponse::text("0.333"),
            ServiceResponse::Text("0.333".to_string())
        );
        assert_eq!(
            ServiceResponse::json("0.333"),
            ServiceResponse::Json(ApiResponse::success("0.333"))
        );
    }
}
