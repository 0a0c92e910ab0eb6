//! Decision table for digit keys.

use crate::domain::token::{self, Token};

/// What a digit press does to the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberAction {
    /// Replace the whole expression with the digit.
    StartNewExpression,
    /// Fuse a pending unary `-` with the digit into `-<digit>`.
    ReplaceLastWithNegative,
    /// Concatenate onto the last literal, then renormalize it.
    AppendDigitToLast,
    /// Insert `×` after a closed group, then the digit.
    ImplicitMultiplyAndAppend,
    /// Append the digit as a new token.
    AppendNewToken,
}

/// Chooses the action for a digit press.
///
/// # Parameters
///
/// * `expression` - Current token sequence
/// * `recalculating` - The previous input completed an evaluation
/// * `negative_pending` - A lone `-` is waiting to become a sign
///
/// # Examples
///
/// ```
/// use rpncalc::app::policy::{number, NumberAction};
/// use rpncalc::domain::token::tokens;
///
/// let action = number::decide(&tokens(&["(", "2", "+", "3", ")"]), false, false);
/// assert_eq!(action, NumberAction::ImplicitMultiplyAndAppend);
/// ```
#[must_use]
pub fn decide(expression: &[Token], recalculating: bool, negative_pending: bool) -> NumberAction {
    let last = expression.last();

    let action = if recalculating || token::is_initial_expression(expression) {
        NumberAction::StartNewExpression
    } else if last.is_some_and(Token::is_subtract) && negative_pending {
        NumberAction::ReplaceLastWithNegative
    } else if token::is_pending_zero_decimal(expression)
        || last.is_some_and(|t| t.is_number() || (t.is_negative_literal() && t.has_numeric_tail()))
    {
        NumberAction::AppendDigitToLast
    } else if last.is_some_and(Token::is_close_paren) {
        NumberAction::ImplicitMultiplyAndAppend
    } else {
        NumberAction::AppendNewToken
    };

    tracing::trace!(?action, recalculating, negative_pending, "number policy");
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::tokens;

    #[test]
    fn starts_fresh_on_initial_or_after_result() {
        assert_eq!(decide(&tokens(&["0"]), false, false), NumberAction::StartNewExpression);
        assert_eq!(decide(&tokens(&["14"]), true, false), NumberAction::StartNewExpression);
    }

    #[test]
    fn fuses_pending_minus() {
        let expr = tokens(&["2", "×", "-"]);
        assert_eq!(decide(&expr, false, true), NumberAction::ReplaceLastWithNegative);
        assert_eq!(decide(&expr, false, false), NumberAction::AppendNewToken);
    }

    #[test]
    fn extends_numeric_literals() {
        assert_eq!(decide(&tokens(&["2", "+", "0."]), false, false), NumberAction::AppendDigitToLast);
        assert_eq!(decide(&tokens(&["12"]), false, false), NumberAction::AppendDigitToLast);
        assert_eq!(decide(&tokens(&["(", "-4"]), false, true), NumberAction::AppendDigitToLast);
    }

    #[test]
    fn multiplies_after_closed_group() {
        assert_eq!(
            decide(&tokens(&["(", "1", ")"]), false, false),
            NumberAction::ImplicitMultiplyAndAppend
        );
        assert_eq!(decide(&tokens(&["("]), false, false), NumberAction::AppendNewToken);
        assert_eq!(decide(&tokens(&["1", "+"]), false, false), NumberAction::AppendNewToken);
    }
}
