//! View model types representing renderable UI state.
//!
//! View models are computed from a [`Snapshot`] and contain only
//! display-ready text. Canonical tokens always use `.` and no digit
//! grouping; [`DisplayOptions`] localizes them for presentation only.
//!
//! # Example
//!
//! ```rust
//! use rpncalc::app::{handle, AppState};
//! use rpncalc::ui::{DisplayOptions, UIViewModel};
//! use rpncalc::Button;
//!
//! let mut state = AppState::default();
//! for button in [Button::Digit(1), Button::Digit(2), Button::Digit(3), Button::Digit(4)] {
//!     handle(&mut state, button);
//! }
//! let options = DisplayOptions { grouping_separator: Some(','), ..Default::default() };
//! let vm = UIViewModel::from_snapshot(&state.snapshot(), &options, state.recording);
//! assert_eq!(vm.expression, "1,234");
//! assert_eq!(vm.delete_label, "⌫");
//! ```

use crate::app::Snapshot;
use crate::domain::{Button, Token};
use serde::{Deserialize, Serialize};

/// Presentation-only number formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Inserted between groups of three integer digits. `None` disables
    /// grouping.
    pub grouping_separator: Option<char>,

    /// Replaces `.` in number literals.
    pub decimal_separator: char,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            grouping_separator: None,
            decimal_separator: '.',
        }
    }
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Expression line, localized.
    pub expression: String,

    /// Label of the delete key: `⌫` while editing, `AC` otherwise.
    pub delete_label: &'static str,

    /// The expression is the `Undefined` sentinel.
    pub is_error: bool,

    /// Voice capture is active.
    pub recording: bool,
}

impl UIViewModel {
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot, options: &DisplayOptions, recording: bool) -> Self {
        let expression = snapshot
            .expression
            .iter()
            .map(|token| localize(token, options))
            .collect();

        let delete_label = if snapshot.allow_backspace {
            Button::Backspace.symbol()
        } else {
            Button::Clear.symbol()
        };

        Self {
            expression,
            delete_label,
            is_error: matches!(snapshot.expression.first(), Some(Token::Undefined)),
            recording,
        }
    }
}

/// Formats one token for display.
///
/// Literals in exponent form (`1.2e+10`) are not grouped.
#[must_use]
pub fn localize(token: &Token, options: &DisplayOptions) -> String {
    let Token::Number(literal) = token else {
        return token.literal().to_string();
    };

    let (sign, unsigned) = literal
        .strip_prefix('-')
        .map_or(("", literal.as_str()), |rest| ("-", rest));
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let integer = match options.grouping_separator {
        Some(separator) if !unsigned.contains('e') => group_digits(integer, separator),
        _ => integer.to_string(),
    };

    match fraction {
        Some(fraction) => format!("{sign}{integer}{}{fraction}", options.decimal_separator),
        None => format!("{sign}{integer}"),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(digits.len() + len / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
    out
}
