//! Decision table for the parenthesis keys.

use crate::domain::token::{self, Token};

/// Which parenthesis key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paren {
    Open,
    Close,
}

/// What a parenthesis press does to the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenAction {
    /// Replace the whole expression with `(`.
    StartNewOpen,
    /// Append `×` then `(` after a number or a closed group.
    ImplicitMultiplyAndOpen,
    AppendOpen,
    AppendClose,
    NoChange,
}

/// Chooses the action for a parenthesis press.
///
/// `)` is accepted only while a group is open and its content is not empty,
/// a bare `0`, or dangling on an operator.
///
/// # Examples
///
/// ```
/// use rpncalc::app::policy::{parenthesis, Paren, ParenAction};
/// use rpncalc::domain::token::tokens;
///
/// assert_eq!(
///     parenthesis::decide(&tokens(&["7"]), Paren::Open, false),
///     ParenAction::ImplicitMultiplyAndOpen
/// );
/// assert_eq!(
///     parenthesis::decide(&tokens(&["(", "2", "+"]), Paren::Close, false),
///     ParenAction::NoChange
/// );
/// ```
#[must_use]
pub fn decide(expression: &[Token], paren: Paren, recalculating: bool) -> ParenAction {
    let last = expression.last();

    let action = match paren {
        Paren::Open => {
            if recalculating || token::is_initial_expression(expression) {
                ParenAction::StartNewOpen
            } else if last.is_some_and(|t| t.is_number() || t.is_close_paren()) {
                ParenAction::ImplicitMultiplyAndOpen
            } else {
                ParenAction::AppendOpen
            }
        }
        Paren::Close => {
            if can_close(expression) {
                ParenAction::AppendClose
            } else {
                ParenAction::NoChange
            }
        }
    };

    tracing::trace!(?paren, ?action, recalculating, "parenthesis policy");
    action
}

fn can_close(expression: &[Token]) -> bool {
    let unbalanced = token::open_paren_count(expression) > token::close_paren_count(expression);

    let closable_tail = match expression {
        [.., before, last] if last.is_zero_literal() => !before.is_open_paren(),
        [.., last] => !last.is_open_paren() && !last.is_operator(),
        [] => false,
    };

    unbalanced && closable_tail
}
