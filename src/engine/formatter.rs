//! Renders a raw result back into a display token.
//!
//! Very large and very small magnitudes use the compact general notation
//! (`1.2e+10`, `5e-05`), everything else is rounded to a fixed number of
//! decimal places with trailing zeros trimmed. The thresholds are named fields
//! of [`FormatPolicy`] so a single policy drives every call site.

use crate::domain::Token;
use serde::{Deserialize, Serialize};

/// Thresholds and precisions for result rendering.
///
/// # Example
///
/// ```rust
/// use rpncalc::engine::FormatPolicy;
///
/// let policy = FormatPolicy::default();
/// assert_eq!(policy.format(12_000_000_000.0), "1.2e+10");
/// assert_eq!(policy.format(2.0 / 3.0), "0.66666667");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatPolicy {
    /// Magnitudes at or above this use general notation.
    pub scientific_upper: f64,
    /// Non-zero magnitudes below this use general notation.
    pub scientific_lower: f64,
    /// Decimal places kept in fixed notation.
    pub fraction_digits: usize,
    /// Significant digits in general notation.
    pub significant_digits: usize,
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self {
            scientific_upper: 1e10,
            scientific_lower: 1e-3,
            fraction_digits: 8,
            significant_digits: 6,
        }
    }
}

impl FormatPolicy {
    /// Turns an evaluation result into the single-token expression shown
    /// afterwards. NaN and infinities become `["Undefined"]`.
    #[must_use]
    pub fn render(&self, value: f64) -> Vec<Token> {
        if value.is_finite() {
            vec![Token::number(self.format(value))]
        } else {
            vec![Token::Undefined]
        }
    }

    /// Formats a finite value.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if value == 0.0 {
            return "0".to_string();
        }

        let magnitude = value.abs();
        if magnitude >= self.scientific_upper || magnitude < self.scientific_lower {
            general(value, self.significant_digits)
        } else {
            let fixed = format!("{value:.prec$}", prec = self.fraction_digits);
            let trimmed = trim_fraction(&fixed);
            if trimmed == "-0" {
                "0".to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}

/// General notation with `precision` significant digits, like C's `%g`.
///
/// Uses exponent form when the decimal exponent is below -4 or at least the
/// precision; the exponent carries a sign and at least two digits.
fn general(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    let scientific = format!("{value:.prec$e}", prec = precision - 1);

    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let max_exponent = i32::try_from(precision).unwrap_or(i32::MAX);

    if exponent < -4 || exponent >= max_exponent {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.unsigned_abs())
    } else {
        let decimals = usize::try_from(max_exponent - 1 - exponent).unwrap_or(0);
        let fixed = format!("{value:.decimals$}");
        trim_fraction(&fixed).to_string()
    }
}

/// Strips trailing zeros after the decimal point, and the point itself.
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
