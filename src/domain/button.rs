//! Button identifiers fed into the expression store.
//!
//! Buttons are the only input the engine understands. Rendering layers and the
//! voice recognizer translate their own events into [`Button`] values.

use super::token::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete calculator button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    /// Digit key; the payload is always in `0..=9`.
    Digit(u8),
    Add,
    Subtract,
    Multiply,
    Divide,
    OpenParen,
    CloseParen,
    Decimal,
    Equals,
    Clear,
    Backspace,
    /// Toggles voice capture. Never changes the expression.
    Mic,
}

/// Input category that selects the append policy for a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonCategory {
    Number,
    Operator,
    Parenthesis,
    Decimal,
    Backspace,
    Clear,
    Equals,
    Mic,
}

impl Button {
    /// All buttons in keypad order.
    pub const ALL: [Self; 21] = [
        Self::Clear,
        Self::OpenParen,
        Self::CloseParen,
        Self::Divide,
        Self::Digit(7),
        Self::Digit(8),
        Self::Digit(9),
        Self::Multiply,
        Self::Digit(4),
        Self::Digit(5),
        Self::Digit(6),
        Self::Subtract,
        Self::Digit(1),
        Self::Digit(2),
        Self::Digit(3),
        Self::Add,
        Self::Mic,
        Self::Digit(0),
        Self::Decimal,
        Self::Equals,
        Self::Backspace,
    ];

    /// Digit button for `n`, or `None` when `n > 9`.
    #[must_use]
    pub const fn digit(n: u8) -> Option<Self> {
        if n <= 9 {
            Some(Self::Digit(n))
        } else {
            None
        }
    }

    /// Symbol printed on the key.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Digit(n) => match n {
                0 => "0",
                1 => "1",
                2 => "2",
                3 => "3",
                4 => "4",
                5 => "5",
                6 => "6",
                7 => "7",
                8 => "8",
                _ => "9",
            },
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Decimal => ".",
            Self::Equals => "=",
            Self::Clear => "AC",
            Self::Backspace => "⌫",
            Self::Mic => "M",
        }
    }

    /// Parses a key symbol. Inverse of [`Button::symbol`].
    ///
    /// ```
    /// use rpncalc::Button;
    ///
    /// assert_eq!(Button::from_symbol("7"), Some(Button::Digit(7)));
    /// assert_eq!(Button::from_symbol("÷"), Some(Button::Divide));
    /// assert_eq!(Button::from_symbol("sqrt"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.symbol() == symbol)
    }

    #[must_use]
    pub const fn category(self) -> ButtonCategory {
        match self {
            Self::Digit(_) => ButtonCategory::Number,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide => ButtonCategory::Operator,
            Self::OpenParen | Self::CloseParen => ButtonCategory::Parenthesis,
            Self::Decimal => ButtonCategory::Decimal,
            Self::Backspace => ButtonCategory::Backspace,
            Self::Clear => ButtonCategory::Clear,
            Self::Equals => ButtonCategory::Equals,
            Self::Mic => ButtonCategory::Mic,
        }
    }

    /// Operator produced by an operator key.
    #[must_use]
    pub const fn operator(self) -> Option<Operator> {
        match self {
            Self::Add => Some(Operator::Add),
            Self::Subtract => Some(Operator::Subtract),
            Self::Multiply => Some(Operator::Multiply),
            Self::Divide => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for button in Button::ALL {
            assert_eq!(Button::from_symbol(button.symbol()), Some(button));
        }
    }

    #[test]
    fn categories() {
        assert_eq!(Button::Digit(3).category(), ButtonCategory::Number);
        assert_eq!(Button::Divide.category(), ButtonCategory::Operator);
        assert_eq!(Button::CloseParen.category(), ButtonCategory::Parenthesis);
        assert_eq!(Button::digit(10), None);
    }
}
