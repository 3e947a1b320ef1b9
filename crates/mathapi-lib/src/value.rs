//! Evaluation results.
//!
//! An evaluator can hand back more than plain numbers, so results are carried
//! as a tagged [`Value`]. Only the numeric case takes part in precision
//! formatting; every other variant is rendered through [`Display`].
//!
//! [`Display`]: std::fmt::Display

use std::fmt;

/// Result of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A real number (possibly infinite or NaN).
    Number(f64),
    /// A boolean result, e.g. from a comparison.
    Boolean(bool),
    /// A textual result.
    Text(String),
}

impl Value {
    /// Coerce the value to a finite `f64` if it represents one.
    ///
    /// Numbers are used directly. Text is read through its longest leading
    /// decimal literal, so `"3.14 cm"` coerces to `3.14`. Booleans never
    /// coerce. Infinite and NaN results yield `None`.
    pub fn as_finite_number(&self) -> Option<f64> {
        let number = match self {
            Value::Number(n) => *n,
            Value::Text(s) => parse_leading_number(s)?,
            Value::Boolean(_) => return None,
        };

        number.is_finite().then_some(number)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Parse the longest decimal literal at the start of `text`, after leading
/// whitespace: an optional sign, digits with an optional fraction, then an
/// optional exponent. Returns `None` when no digit leads the text.
fn parse_leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_digits = digits_from(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digits_from(end + 1);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_digits = digits_from(end + 1 + sign);
        if exponent_digits > 0 {
            end += 1 + sign + exponent_digits;
        }
    }

    text[..end].parse().ok()
}

/// Render a number the way the legacy API does without a precision.
///
/// Uses the shortest decimal digits that round-trip to the same `f64`. Plain
/// notation is used for decimal exponents in `-6..21`, exponential notation
/// with an explicit exponent sign otherwise (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let parts = DecimalParts::shortest(value);
    let sign = if parts.negative { "-" } else { "" };

    if (-6..21).contains(&parts.exponent) {
        format!("{}{}", sign, parts.to_plain())
    } else {
        format!("{}{}", sign, parts.to_exponential())
    }
}

/// Decimal digits of a non-zero finite number, `d.ddd × 10^exponent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecimalParts {
    pub negative: bool,
    /// Significant digits without leading zeros, each in `0..=9`.
    pub digits: Vec<u8>,
    /// Decimal exponent of the first digit.
    pub exponent: i32,
}

impl DecimalParts {
    /// Split a finite, non-zero number into its shortest round-trip digits.
    pub fn shortest(value: f64) -> Self {
        // `{:e}` yields the shortest round-trip mantissa, e.g. "1.2345e-7".
        let rendered = format!("{:e}", value.abs());
        let (mantissa, exponent) = rendered.split_once('e').unwrap_or((&rendered, "0"));

        let mut digits: Vec<u8> = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        while digits.len() > 1 && digits.last() == Some(&0) {
            digits.pop();
        }

        Self {
            negative: value.is_sign_negative(),
            digits,
            exponent: exponent.parse().unwrap_or(0),
        }
    }

    /// Round half-up to at most `precision` significant digits.
    ///
    /// `precision` must be at least 1. Trailing zeros produced by the rounding
    /// are dropped.
    pub fn round_to(&self, precision: usize) -> Self {
        let mut rounded = self.clone();
        if rounded.digits.len() <= precision {
            return rounded;
        }

        let round_up = rounded.digits[precision] >= 5;
        rounded.digits.truncate(precision);

        if round_up {
            let mut index = precision;
            loop {
                if index == 0 {
                    // Every kept digit was a 9: 9.99 -> 10.0
                    rounded.digits.insert(0, 1);
                    rounded.digits.truncate(precision);
                    rounded.exponent += 1;
                    break;
                }
                index -= 1;
                if rounded.digits[index] == 9 {
                    rounded.digits[index] = 0;
                } else {
                    rounded.digits[index] += 1;
                    break;
                }
            }
        }

        while rounded.digits.len() > 1 && rounded.digits.last() == Some(&0) {
            rounded.digits.pop();
        }
        rounded
    }

    /// Fixed notation of the magnitude, e.g. `0.00123`, `120`, `3.5`.
    pub fn to_plain(&self) -> String {
        let digits: String = self.digits.iter().map(|d| char::from(b'0' + d)).collect();

        if self.exponent < 0 {
            let zeros = "0".repeat((-self.exponent - 1) as usize);
            return format!("0.{}{}", zeros, digits);
        }

        let int_len = self.exponent as usize + 1;
        if digits.len() <= int_len {
            format!("{}{}", digits, "0".repeat(int_len - digits.len()))
        } else {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        }
    }

    /// Exponential notation of the magnitude, e.g. `1.2e-4`, `5e+21`.
    pub fn to_exponential(&self) -> String {
        let digits: String = self.digits.iter().map(|d| char::from(b'0' + d)).collect();
        let (lead, rest) = digits.split_at(1);
        let mantissa = if rest.is_empty() {
            lead.to_string()
        } else {
            format!("{}.{}", lead, rest)
        };

        if self.exponent >= 0 {
            format!("{}e+{}", mantissa, self.exponent)
        } else {
            format!("{}e{}", mantissa, self.exponent)
        }
    }
}
