//! Decision table for the backspace key.

use crate::domain::token::{self, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackspaceAction {
    NoChange,
    /// Wipe the error sentinel; the processor restores `["0"]`.
    ClearAll,
    /// Remove the final character of a multi-character literal.
    TrimLastChar,
    /// Remove the whole last token, falling back to `["0"]` when empty.
    DropLastToken,
}

/// Chooses the action for a backspace press.
#[must_use]
pub fn decide(expression: &[Token]) -> BackspaceAction {
    let action = match expression.last() {
        None => BackspaceAction::NoChange,
        Some(_) if token::is_initial_expression(expression) => BackspaceAction::NoChange,
        Some(_) if token::is_error_state(expression) => BackspaceAction::ClearAll,
        Some(last) if last.literal().chars().count() > 1 => BackspaceAction::TrimLastChar,
        Some(_) => BackspaceAction::DropLastToken,
    };

    tracing::trace!(?action, "backspace policy");
    action
}
