//! Decision table for the binary operator keys.

use crate::domain::token::{self, Operator, Token};

/// What an operator press does to the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorAction {
    /// Append `-` as a pending sign for the next number.
    AppendAndMarkNegative,
    NoChange,
    /// Drop a dangling unary `-`.
    DropLast,
    /// Keep only the most recent binary operator choice.
    ReplaceLastOperator,
    AppendOperator,
}

/// Chooses the action for an operator press.
///
/// A `-` at the start of the expression, after `(`, or after `×`/`÷` is a
/// sign rather than a subtraction.
///
/// # Examples
///
/// ```
/// use rpncalc::app::policy::{operator, OperatorAction};
/// use rpncalc::domain::{token::tokens, Operator};
///
/// let action = operator::decide(&tokens(&["3", "×"]), Operator::Subtract);
/// assert_eq!(action, OperatorAction::AppendAndMarkNegative);
///
/// let action = operator::decide(&tokens(&["3", "×"]), Operator::Add);
/// assert_eq!(action, OperatorAction::ReplaceLastOperator);
/// ```
#[must_use]
pub fn decide(expression: &[Token], incoming: Operator) -> OperatorAction {
    if token::is_error_state(expression) {
        return OperatorAction::NoChange;
    }

    let last = expression.last();
    let is_subtract = incoming == Operator::Subtract;
    let last_open = last.is_some_and(Token::is_open_paren);
    let sign_context = expression.is_empty() || last_open || last.is_some_and(Token::is_high_priority_operator);

    let action = if sign_context && is_subtract {
        OperatorAction::AppendAndMarkNegative
    } else if !is_subtract && last_open {
        OperatorAction::NoChange
    } else if !is_subtract && last.is_some_and(Token::is_subtract) {
        OperatorAction::DropLast
    } else if last.is_some_and(Token::is_operator) {
        OperatorAction::ReplaceLastOperator
    } else {
        OperatorAction::AppendOperator
    };

    tracing::trace!(?action, %incoming, "operator policy");
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::tokens;

    #[test]
    fn error_state_is_inert() {
        assert_eq!(decide(&tokens(&["Undefined"]), Operator::Add), OperatorAction::NoChange);
        assert_eq!(decide(&tokens(&["Undefined"]), Operator::Subtract), OperatorAction::NoChange);
    }

    #[test]
    fn minus_as_sign() {
        assert_eq!(decide(&[], Operator::Subtract), OperatorAction::AppendAndMarkNegative);
        assert_eq!(decide(&tokens(&["("]), Operator::Subtract), OperatorAction::AppendAndMarkNegative);
        assert_eq!(decide(&tokens(&["2", "÷"]), Operator::Subtract), OperatorAction::AppendAndMarkNegative);
    }

    #[test]
    fn cannot_open_group_with_binary_operator() {
        assert_eq!(decide(&tokens(&["("]), Operator::Multiply), OperatorAction::NoChange);
    }

    #[test]
    fn cancels_unary_minus() {
        assert_eq!(decide(&tokens(&["2", "×", "-"]), Operator::Add), OperatorAction::DropLast);
    }

    #[test]
    fn replaces_or_appends() {
        assert_eq!(decide(&tokens(&["2", "+"]), Operator::Multiply), OperatorAction::ReplaceLastOperator);
        assert_eq!(decide(&tokens(&["2", "+"]), Operator::Subtract), OperatorAction::ReplaceLastOperator);
        assert_eq!(decide(&tokens(&["2"]), Operator::Divide), OperatorAction::AppendOperator);
        assert_eq!(decide(&tokens(&["0"]), Operator::Subtract), OperatorAction::AppendOperator);
    }
}
