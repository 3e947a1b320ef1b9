//! Application state for the HTTP service.
//!
//! The state only carries the evaluator. It is immutable after startup and
//! shared across requests through axum's `State` extractor.

use std::sync::Arc;

use mathapi_lib::{Evaluator, MevalEvaluator};

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally).
///
/// # Example
///
/// ```
/// use axum::{Router, routing::get, extract::State};
/// use mathapi_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) -> String {
///     state.evaluator().evaluate("1 + 1").map(|v| v.to_string()).unwrap_or_default()
/// }
///
/// let app: Router = Router::new()
///     .route("/", get(handler))
///     .with_state(AppState::default());
/// ```
#[derive(Clone)]
pub struct AppState {
    evaluator: Arc<dyn Evaluator>,
}

impl AppState {
    /// Create state around a specific evaluator.
    pub fn new(evaluator: impl Evaluator + 'static) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
        }
    }

    /// Access the evaluator.
    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(MevalEvaluator::new())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathapi_lib::Value;

    #[test]
    fn test_default_state_evaluates() {
        let state = AppState::default();
        let value = state.evaluator().evaluate("2+2").unwrap();
        assert_eq!(value, Value::Number(4.0));
    }

    #[test]
    fn test_app_state_clone_shares_evaluator() {
        let state1 = AppState::new(MevalEvaluator);
        let state2 = state1.clone();

        assert!(Arc::ptr_eq(&state1.evaluator, &state2.evaluator));
        assert_eq!(
            state1.evaluator().evaluate("3*3").unwrap(),
            state2.evaluator().evaluate("3*3").unwrap()
        );
    }

    #[test]
    fn test_app_state_debug() {
        let debug = format!("{:?}", AppState::default());
        assert!(debug.contains("AppState"));
    }
}
