//! Decision table for the decimal point key.

use crate::domain::token::{self, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalAction {
    NoChange,
    /// Append a fresh `"0."` token.
    AppendZeroDecimal,
    /// Replace the whole expression with `["0."]`.
    StartNewDecimal,
    /// Append `.` to the last literal.
    AppendDecimalToLast,
    /// Replace a pending sign `-` with `-0.`.
    FuseWithSign,
}

/// Chooses the action for a decimal point press.
///
/// A closed group cannot take a decimal point, so `)` is treated like a
/// literal that already has one. A `-` waiting to become a sign takes the
/// point as the start of its literal.
#[must_use]
pub fn decide(expression: &[Token], recalculating: bool, negative_pending: bool) -> DecimalAction {
    let last = expression.last();

    let action = if token::is_error_state(expression)
        || last.is_some_and(|t| t.is_decimal_literal() || t.is_close_paren())
    {
        DecimalAction::NoChange
    } else if negative_pending && last.is_some_and(Token::is_subtract) {
        DecimalAction::FuseWithSign
    } else if last.map_or(true, |t| t.is_operator() || t.is_open_paren()) {
        DecimalAction::AppendZeroDecimal
    } else if recalculating {
        DecimalAction::StartNewDecimal
    } else {
        DecimalAction::AppendDecimalToLast
    };

    tracing::trace!(?action, recalculating, negative_pending, "decimal policy");
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::tokens;

    #[test]
    fn one_point_per_literal() {
        assert_eq!(decide(&tokens(&["3.1"]), false, false), DecimalAction::NoChange);
        assert_eq!(decide(&tokens(&["Undefined"]), true, false), DecimalAction::NoChange);
        assert_eq!(decide(&tokens(&["(", "2", ")"]), false, false), DecimalAction::NoChange);
    }

    #[test]
    fn fresh_zero_after_operator_or_group() {
        assert_eq!(decide(&tokens(&["3", "+"]), false, false), DecimalAction::AppendZeroDecimal);
        assert_eq!(decide(&tokens(&["("]), true, false), DecimalAction::AppendZeroDecimal);
    }

    #[test]
    fn restarts_after_result() {
        assert_eq!(decide(&tokens(&["14"]), true, false), DecimalAction::StartNewDecimal);
        assert_eq!(decide(&tokens(&["14"]), false, false), DecimalAction::AppendDecimalToLast);
        assert_eq!(decide(&tokens(&["0"]), false, false), DecimalAction::AppendDecimalToLast);
    }

    #[test]
    fn pending_sign_takes_the_point() {
        assert_eq!(decide(&tokens(&["3", "×", "-"]), false, true), DecimalAction::FuseWithSign);
        assert_eq!(decide(&tokens(&["(", "-"]), false, true), DecimalAction::FuseWithSign);
        assert_eq!(decide(&tokens(&["3", "-"]), false, false), DecimalAction::AppendZeroDecimal);
    }
}
