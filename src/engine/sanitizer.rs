//! Pre-evaluation repair and the validity gate.
//!
//! Pressing equals on a half-typed expression should still do something
//! sensible. [`sanitize`] drops trailing operators and open parentheses,
//! canonicalizes every numeric literal and closes groups left open.
//! [`check`] then decides whether the repaired sequence is worth evaluating.

use crate::domain::token::{self, normalize_literal, Token};

/// Outcome of [`sanitize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sanitized {
    /// Structurally closed expression ready for the validity check.
    Ready(Vec<Token>),
    /// Nothing survived trimming; the store resets to `["0"]` and skips
    /// evaluation.
    Emptied,
}

/// Verdict of [`check`] on a sanitized expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Evaluate it.
    Valid,
    /// Fewer than two numbers or unbalanced groups: equals is ignored.
    Incomplete,
    /// At least as many operators as numbers: shown as `Undefined`.
    Malformed,
}

/// Repairs a trailing-incomplete expression.
///
/// # Examples
///
/// ```
/// use rpncalc::engine::sanitizer::{sanitize, Sanitized};
/// use rpncalc::domain::token::tokens;
///
/// let repaired = sanitize(&tokens(&["(", "02", "+", "3", "×"]));
/// assert_eq!(repaired, Sanitized::Ready(tokens(&["(", "2", "+", "3", ")"])));
///
/// assert_eq!(sanitize(&tokens(&["(", "-"])), Sanitized::Emptied);
/// ```
#[must_use]
pub fn sanitize(expression: &[Token]) -> Sanitized {
    let keep = expression
        .iter()
        .rposition(|t| !t.is_operator() && !t.is_open_paren())
        .map_or(0, |index| index + 1);

    if keep == 0 {
        tracing::debug!(dropped = expression.len(), "expression emptied by sanitizer");
        return Sanitized::Emptied;
    }

    let mut repaired: Vec<Token> = expression[..keep]
        .iter()
        .map(|t| {
            if t.is_number() || (t.is_negative_literal() && t.has_numeric_tail()) {
                Token::number(normalize_literal(t.literal()))
            } else {
                t.clone()
            }
        })
        .collect();

    let missing = token::open_paren_count(&repaired).saturating_sub(token::close_paren_count(&repaired));
    repaired.extend(std::iter::repeat(Token::CloseParen).take(missing));

    tracing::trace!(
        dropped = expression.len() - keep,
        closed = missing,
        "expression sanitized"
    );

    Sanitized::Ready(repaired)
}

/// Classifies a sanitized expression.
///
/// ```
/// use rpncalc::engine::sanitizer::{check, Validity};
/// use rpncalc::domain::token::tokens;
///
/// assert_eq!(check(&tokens(&["2", "+", "3"])), Validity::Valid);
/// assert_eq!(check(&tokens(&["-5"])), Validity::Incomplete);
/// ```
#[must_use]
pub fn check(expression: &[Token]) -> Validity {
    let numbers = token::numeric_count(expression);
    let operators = token::operator_count(expression);
    let balanced = token::open_paren_count(expression) == token::close_paren_count(expression);

    if numbers <= 1 || !balanced {
        Validity::Incomplete
    } else if numbers <= operators {
        Validity::Malformed
    } else {
        Validity::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::tokens;

    #[test]
    fn drops_dangling_tail() {
        assert_eq!(
            sanitize(&tokens(&["2", "+", "(", "-"])),
            Sanitized::Ready(tokens(&["2"]))
        );
        assert_eq!(sanitize(&tokens(&["("])), Sanitized::Emptied);
    }

    #[test]
    fn normalizes_literals() {
        assert_eq!(
            sanitize(&tokens(&["3.", "×", "-04"])),
            Sanitized::Ready(tokens(&["3", "×", "-4"]))
        );
    }

    #[test]
    fn auto_closes_groups() {
        assert_eq!(
            sanitize(&tokens(&["(", "(", "1", "+", "2", ")"])),
            Sanitized::Ready(tokens(&["(", "(", "1", "+", "2", ")", ")"]))
        );
    }

    #[test]
    fn validity_verdicts() {
        assert_eq!(check(&tokens(&["5"])), Validity::Incomplete);
        assert_eq!(check(&tokens(&["(", "5", "+", "1"])), Validity::Incomplete);
        assert_eq!(
            check(&tokens(&["2", "×", "(", "-", "(", "3", ")", ")"])),
            Validity::Malformed
        );
        assert_eq!(check(&tokens(&["(", "2", "+", "3", ")", "×", "4"])), Validity::Valid);
    }
}
