//! Result formatting with optional significant-digit precision.
//!
//! Precision always means significant digits, never decimal places: `1/3` at
//! precision 3 is `0.333` and `123.4` at precision 2 is `120`. Very small and
//! very large magnitudes switch to exponential notation (`1.2e-4`, `1.2e+5`).

use crate::value::{DecimalParts, Value};

/// Smallest decimal exponent still rendered in fixed notation.
pub const LOWER_EXPONENT: i32 = -3;

/// Decimal exponent from which exponential notation is used.
pub const UPPER_EXPONENT: i32 = 5;

/// Format an evaluation result for display.
///
/// Without a precision the result's default representation is returned. With a
/// precision, results that coerce to a finite number are rendered with
/// [`format_significant`]; anything else silently ignores the precision.
pub fn format_result(result: &Value, precision: Option<i64>) -> String {
    let Some(precision) = precision else {
        return result.to_string();
    };

    match result.as_finite_number() {
        Some(number) => format_significant(number, precision),
        None => result.to_string(),
    }
}

/// Render `value` with at most `precision` significant digits.
///
/// Digits are rounded half-up from the shortest round-trip representation and
/// trailing fractional zeros are stripped. A precision below 1 has no digits to
/// keep, so the default representation is returned instead.
pub fn format_significant(value: f64, precision: i64) -> String {
    if precision < 1 || !value.is_finite() {
        return Value::Number(value).to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = usize::try_from(precision).unwrap_or(usize::MAX);
    let rounded = DecimalParts::shortest(value).round_to(precision);
    let sign = if rounded.negative { "-" } else { "" };

    if rounded.exponent < LOWER_EXPONENT || rounded.exponent >= UPPER_EXPONENT {
        format!("{}{}", sign, rounded.to_exponential())
    } else {
        format!("{}{}", sign, rounded.to_plain())
    }
}
