//! Test utilities for handler testing.
//!
//! Provides application state wired to the real evaluator and a
//! [`StubEvaluator`] for driving handlers through results and failures the
//! real engine never produces.

use mathapi_lib::{Error as LibError, Evaluator, Result as LibResult, Value};

use crate::state::AppState;

/// Application state using the default `meval`-backed evaluator.
pub fn test_state() -> AppState {
    AppState::default()
}

/// Application state using a stub evaluator.
pub fn stub_state(stub: StubEvaluator) -> AppState {
    AppState::new(stub)
}

/// Evaluator with a canned outcome, independent of the expression text.
#[derive(Debug, Clone)]
pub enum StubEvaluator {
    /// Always return this value.
    Returns(Value),
    /// Always fail with this evaluator message.
    Fails(String),
    /// Panic during evaluation, to exercise the 500 fallback.
    Panics(String),
}

impl Evaluator for StubEvaluator {
    fn evaluate(&self, _expression: &str) -> LibResult<Value> {
        match self {
            Self::Returns(value) => Ok(value.clone()),
            Self::Fails(message) => Err(LibError::evaluation(message)),
            Self::Panics(message) => panic!("{}", message),
        }
    }
}
