//! Request types and validation for the evaluation endpoints.
//!
//! Both transports end up as an [`EvaluationRequest`]. The GET variant carries
//! its parameters in the query string and percent-decodes `expr` once more
//! before evaluation; the POST variant takes `expr` verbatim from a JSON or
//! form-encoded body.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::ServiceError;

/// A validated evaluation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    /// Expression text handed to the evaluator. Never empty.
    pub expression: String,

    /// Requested significant digits, if any.
    pub precision: Option<i64>,
}

/// Validation trait for raw request types.
///
/// Consumes the raw transport form and yields a validated
/// [`EvaluationRequest`], or the [`ServiceError`] to report.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    fn validate(self) -> Result<EvaluationRequest, ServiceError>;
}

/// Query parameters of `GET /v4/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluateQuery {
    /// URL-encoded expression.
    pub expr: Option<String>,

    /// Precision as sent, parsed loosely.
    pub precision: Option<String>,
}

impl Validate for EvaluateQuery {
    fn validate(self) -> Result<EvaluationRequest, ServiceError> {
        let expr = self
            .expr
            .filter(|e| !e.is_empty())
            .ok_or(ServiceError::MissingExpression)?;

        Ok(EvaluationRequest {
            expression: decode_component(&expr)?,
            precision: self.precision.as_deref().and_then(parse_precision),
        })
    }
}

/// Percent-decode a URI component.
///
/// Every `%` must start a two-digit hex escape and the decoded bytes must be
/// UTF-8, otherwise the component is rejected as [`ServiceError::MalformedUri`].
pub fn decode_component(raw: &str) -> Result<String, ServiceError> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || matches!(
                bytes.get(i + 1..i + 3),
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
            )
    });
    if !well_formed {
        return Err(ServiceError::MalformedUri);
    }

    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ServiceError::MalformedUri)
}

/// Body of `POST /v4/`, sent as JSON or as a urlencoded form.
///
/// Fields are kept as raw JSON so that type mismatches are reported through
/// the API envelope rather than as deserialization failures. Form fields
/// always arrive as JSON strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluateBody {
    /// Expression text, expected to be a JSON string.
    #[serde(default)]
    pub expr: Option<JsonValue>,

    /// Precision, expected to be a JSON number.
    #[serde(default)]
    pub precision: Option<JsonValue>,
}

impl EvaluateBody {
    /// Parse a JSON request body. An empty body is treated as `{}`.
    ///
    /// A body that is not a JSON object is an internal fault: the parser
    /// detail is logged, never returned to the client.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ServiceError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
            .map_err(|e| ServiceError::Internal(format!("invalid JSON body: {e}")))
    }
}

/// Whether a `Content-Type` value names a urlencoded form.
pub fn is_form_content_type(content_type: Option<&HeaderValue>) -> bool {
    content_type
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

impl Validate for EvaluateBody {
    fn validate(self) -> Result<EvaluationRequest, ServiceError> {
        let expression = match self.expr {
            Some(JsonValue::String(s)) if !s.is_empty() => s,
            Some(value) if is_truthy(&value) => return Err(ServiceError::ExpressionNotString),
            _ => return Err(ServiceError::MissingExpression),
        };

        let precision = match self.precision {
            Some(JsonValue::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Some(JsonValue::String(s)) => parse_precision(&s),
            _ => None,
        };

        Ok(EvaluationRequest {
            expression,
            precision,
        })
    }
}

/// JSON values other than `null`, `false`, `0` and `""` count as present.
fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

/// Parse a precision the lenient way: optional leading whitespace, an optional
/// sign, then as many decimal digits as are present. Anything after the digits
/// is ignored. Returns `None` when no digits lead the string.
///
/// ```
/// use mathapi_service_shared::parse_precision;
///
/// assert_eq!(parse_precision("3"), Some(3));
/// assert_eq!(parse_precision(" 12abc"), Some(12));
/// assert_eq!(parse_precision("abc"), None);
/// ```
pub fn parse_precision(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }

    // Saturate instead of failing on absurdly long digit runs.
    let magnitude = unsigned[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
