//! mathapi HTTP service.
//!
//! Evaluates mathematical expressions on a mathjs-style API.
//!
//! # Endpoints
//!
//! - `GET /v4/?expr=<expression>&precision=<digits>` - plain-text result
//! - `POST /v4/` with `{"expr": "<expression>", "precision": <digits>}`, or the
//!   same fields form-encoded - JSON envelope
//! - `GET /health` - liveness with timestamp
//! - `GET /metrics` - Prometheus metrics, only when enabled
//!
//! Anything else answers 404 with the JSON envelope. Handler panics are turned
//! into a 500 envelope by the panic layer.

#![deny(warnings)]

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, FromRequest, Query, Request, State},
    http::header::CONTENT_TYPE,
    routing::{get, MethodRouter},
    Form, Router,
};
use tracing::{info, warn};

use mathapi_lib::format_result;
use mathapi_service_shared::{
    catch_panic_layer, cors_layer, health, is_form_content_type, metrics_handler, record_evaluation,
    record_evaluation_failed, AppState, EvaluateBody, EvaluateQuery, EvaluationRequest,
    MetricsConfig, MetricsLayer, ServiceError, ServiceResponse, Validate,
};

/// Build the application router.
///
/// The metrics route is mounted only when `metrics.enabled` is set.
pub fn router(state: AppState, metrics: &MetricsConfig) -> Router {
    let evaluate: MethodRouter<AppState> = get(evaluate_get).post(evaluate_post).fallback(not_found);

    let mut router = Router::new()
        .route("/health", get(health).fallback(not_found))
        .route("/v4/", evaluate.clone())
        .route("/v4", evaluate);

    if metrics.enabled {
        router = router.route(&metrics.path, get(metrics_handler).fallback(not_found));
    }

    router
        .fallback(not_found)
        .layer(catch_panic_layer())
        .layer(cors_layer())
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle `GET /v4/`: answer with the bare formatted result as plain text.
async fn evaluate_get(
    State(state): State<AppState>,
    query: Result<Query<EvaluateQuery>, QueryRejection>,
) -> Result<ServiceResponse, ServiceError> {
    let outcome = query
        .map_err(|rejection| ServiceError::MalformedRequest(rejection.body_text()))
        .and_then(|Query(query)| query.validate())
        .and_then(|request| evaluate(&state, &request));

    finish("GET", outcome).map(ServiceResponse::text)
}

/// Handle `POST /v4/`: answer with the JSON envelope.
async fn evaluate_post(
    State(state): State<AppState>,
    request: Request,
) -> Result<ServiceResponse, ServiceError> {
    let outcome = read_body(request)
        .await
        .and_then(Validate::validate)
        .and_then(|request| evaluate(&state, &request));

    finish("POST", outcome).map(ServiceResponse::json)
}

/// Read a POST body as a urlencoded form or, for any other content type, JSON.
///
/// A body that cannot be read or parsed is an internal fault.
async fn read_body(request: Request) -> Result<EvaluateBody, ServiceError> {
    if is_form_content_type(request.headers().get(CONTENT_TYPE)) {
        let Form(body) = Form::<EvaluateBody>::from_request(request, &())
            .await
            .map_err(|rejection| ServiceError::Internal(rejection.body_text()))?;
        return Ok(body);
    }

    let bytes = Bytes::from_request(request, &())
        .await
        .map_err(|rejection| ServiceError::Internal(rejection.body_text()))?;
    EvaluateBody::from_slice(&bytes)
}

/// Catch-all for unknown paths and unsupported methods.
async fn not_found() -> ServiceError {
    ServiceError::NotFound
}

/// Evaluate a validated request and format the result.
fn evaluate(state: &AppState, request: &EvaluationRequest) -> Result<String, ServiceError> {
    let value = state.evaluator().evaluate(&request.expression)?;
    Ok(format_result(&value, request.precision))
}

/// Record the outcome of an evaluation request.
fn finish(method: &str, outcome: Result<String, ServiceError>) -> Result<String, ServiceError> {
    match &outcome {
        Ok(result) => {
            record_evaluation(method);
            info!(method, result = %result, "expression evaluated");
        }
        Err(err) => {
            record_evaluation_failed(method, err.reason());
            warn!(method, reason = err.reason(), error = %err, "evaluation request rejected");
        }
    }
    outcome
}
