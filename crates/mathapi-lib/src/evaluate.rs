//! Expression evaluation.
//!
//! The evaluator is an opaque collaborator: callers hand it expression text and
//! get back a [`Value`] or an [`Error::Evaluation`](crate::Error::Evaluation) carrying the engine's own
//! message. [`MevalEvaluator`] is the default engine.

use std::f64::consts::TAU;

use meval::{Context, Expr};
use tracing::debug;

use crate::error::Result;
use crate::value::Value;

/// The golden ratio.
const PHI: f64 = 1.618_033_988_749_895;

/// A pure, synchronous expression evaluator.
///
/// Implementations must be deterministic: the same expression text always
/// produces the same value or the same error.
pub trait Evaluator: Send + Sync {
    /// Evaluate `expression` and return its value.
    fn evaluate(&self, expression: &str) -> Result<Value>;
}

/// Evaluator backed by the `meval` crate.
///
/// Extends meval's built-ins (`sqrt`, `exp`, `ln`, `abs`, trigonometric and
/// hyperbolic functions, `floor`, `ceil`, `round`, `signum`, `atan2`, `max`,
/// `min`, `pi`, `e`) with a handful of functions and constants common in
/// calculator grammars.
#[derive(Debug, Clone, Copy, Default)]
pub struct MevalEvaluator;

impl MevalEvaluator {
    pub fn new() -> Self {
        Self
    }

    fn context() -> Context<'static> {
        let mut ctx = Context::new();
        ctx.var("tau", TAU)
            .var("phi", PHI)
            .func("log10", f64::log10)
            .func("log2", f64::log2)
            .func("cbrt", f64::cbrt)
            .func("sign", f64::signum)
            .func2("pow", f64::powf)
            .func2("mod", modulo)
            .funcn("log", log, 1..3)
            .funcn("hypot", |xs: &[f64]| xs.iter().map(|x| x * x).sum::<f64>().sqrt(), 1..);
        ctx
    }
}

impl Evaluator for MevalEvaluator {
    fn evaluate(&self, expression: &str) -> Result<Value> {
        let expr: Expr = expression.parse()?;
        let value = expr.eval_with_context(Self::context())?;
        debug!(expression, value, "expression evaluated");
        Ok(Value::Number(value))
    }
}

/// Evaluate `expression` with the default evaluator.
pub fn evaluate(expression: &str) -> Result<Value> {
    MevalEvaluator.evaluate(expression)
}

/// Natural logarithm, or logarithm in the given base when a second argument is
/// present.
fn log(args: &[f64]) -> f64 {
    match args {
        [x] => x.ln(),
        [x, base] => x.ln() / base.ln(),
        _ => f64::NAN,
    }
}

/// Modulus with the sign of the divisor, `mod(-1, 3) == 2`.
fn modulo(x: f64, y: f64) -> f64 {
    if y == 0.0 {
        return x;
    }
    x - y * (x / y).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn close(expression: &str, expected: f64) -> bool {
        (number(expression) - expected).abs() < 1e-12
    }

    fn number(expression: &str) -> f64 {
        match evaluate(expression).unwrap() {
            Value::Number(n) => n,
            other => panic!("expected a number, got {:?}", other),
        }
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(number("2+2"), 4.0);
        assert_eq!(number("2 * (3 + 4)"), 14.0);
        assert_eq!(number("2^10"), 1024.0);
        assert!((number("1/3") - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_builtin_functions_and_constants() {
        assert_eq!(number("sqrt(16)"), 4.0);
        assert!((number("sin(pi / 2)") - 1.0).abs() < 1e-12);
        assert!((number("e") - std::f64::consts::E).abs() < 1e-15);
    }

    #[test]
    fn test_extended_functions() {
        assert!(close("log(8, 2)", 3.0));
        assert!(close("log(e)", 1.0));
        assert!(close("log10(1000)", 3.0));
        assert!(close("log2(8)", 3.0));
        assert!(close("cbrt(27)", 3.0));
        assert!(close("pow(2, 3)", 8.0));
        assert!(close("mod(-1, 3)", 2.0));
        assert!(close("hypot(3, 4)", 5.0));
        assert!(close("sign(-7)", -1.0));
        assert!(close("tau", 2.0 * std::f64::consts::PI));
        assert!(close("phi", (1.0 + 5f64.sqrt()) / 2.0));
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        assert_eq!(number("1/0"), f64::INFINITY);
    }

    #[test]
    fn test_malformed_expression_fails() {
        let err = evaluate("2 +").unwrap_err();
        assert!(matches!(err, Error::Evaluation { .. }));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_unknown_identifier_fails() {
        let err = evaluate("foo + 1").unwrap_err();
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        assert_eq!(evaluate("sqrt(2)").unwrap(), evaluate("sqrt(2)").unwrap());
    }
}
