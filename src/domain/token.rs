//! Expression tokens, token predicates and literal normalization.
//!
//! A [`Token`] is the atomic unit of an expression: a numeric literal, one of
//! the four binary operators, a parenthesis, or the `Undefined` error
//! sentinel. Numeric literals are kept as text so that partially typed
//! numbers such as `"3."` or a bare `"-"` prefix survive editing unchanged.
//!
//! The free functions in this module are the predicates the append policies
//! consult. All of them are total and side-effect free.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal displayed when an evaluation fails.
pub const UNDEFINED: &str = "Undefined";

/// Literal of the initial expression.
pub const ZERO: &str = "0";

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Display symbol used both on the button and inside the expression.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Parses an operator symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "×" => Some(Self::Multiply),
            "÷" => Some(Self::Divide),
            _ => None,
        }
    }

    /// Binding strength for the shunting-yard conversion.
    ///
    /// `+`/`-` bind with 1, `×`/`÷` with 2. All operators are left-associative.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
        }
    }

    /// Returns `true` for `×` and `÷`.
    #[must_use]
    pub const fn is_high_priority(self) -> bool {
        matches!(self, Self::Multiply | Self::Divide)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An atomic piece of an expression.
///
/// Tokens are immutable values; the expression store owns the sequence and
/// hands out clones. A lone `-` is always represented as
/// `Operator(Subtract)`, even when it is waiting to become the sign of the
/// next number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Token {
    /// Numeric literal text, e.g. `"12"`, `"-3.5"`, `"0."` or `"1.2e+10"`.
    Number(String),
    /// Binary operator.
    Operator(Operator),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// The `Undefined` error sentinel.
    Undefined,
}

impl Token {
    /// Classifies a literal string.
    ///
    /// Operator symbols, parentheses and the error sentinel map to their
    /// variants; any other text is kept as a number literal, whether or not
    /// it currently parses.
    ///
    /// # Examples
    ///
    /// ```
    /// use rpncalc::domain::{Operator, Token};
    ///
    /// assert_eq!(Token::from_literal("-"), Token::Operator(Operator::Subtract));
    /// assert_eq!(Token::from_literal("-5"), Token::number("-5"));
    /// assert_eq!(Token::from_literal("("), Token::OpenParen);
    /// ```
    #[must_use]
    pub fn from_literal(literal: &str) -> Self {
        match literal {
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            UNDEFINED => Self::Undefined,
            other => Operator::from_symbol(other)
                .map_or_else(|| Self::Number(other.to_string()), Self::Operator),
        }
    }

    /// Builds a number token from literal text.
    #[must_use]
    pub fn number(literal: impl Into<String>) -> Self {
        Self::Number(literal.into())
    }

    /// The `"0"` token.
    #[must_use]
    pub fn zero() -> Self {
        Self::Number(ZERO.to_string())
    }

    /// Literal text of the token as shown on the display.
    #[must_use]
    pub fn literal(&self) -> &str {
        match self {
            Self::Number(text) => text,
            Self::Operator(op) => op.symbol(),
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Undefined => UNDEFINED,
        }
    }

    /// Returns `true` if the literal parses as a finite or infinite number.
    ///
    /// `"3."` counts as numeric, `"-"` and `"1.2e+"` do not.
    #[must_use]
    pub fn is_number(&self) -> bool {
        match self {
            Self::Number(text) => parse_literal(text).is_some(),
            _ => false,
        }
    }

    /// Numeric value of the literal, if it has one.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(text) => parse_literal(text),
            _ => None,
        }
    }

    /// Operator carried by the token, if any.
    #[must_use]
    pub const fn as_operator(&self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(*op),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    #[must_use]
    pub const fn is_high_priority_operator(&self) -> bool {
        matches!(self, Self::Operator(op) if op.is_high_priority())
    }

    #[must_use]
    pub const fn is_subtract(&self) -> bool {
        matches!(self, Self::Operator(Operator::Subtract))
    }

    #[must_use]
    pub const fn is_open_paren(&self) -> bool {
        matches!(self, Self::OpenParen)
    }

    #[must_use]
    pub const fn is_close_paren(&self) -> bool {
        matches!(self, Self::CloseParen)
    }

    /// Literal contains a decimal point.
    #[must_use]
    pub fn is_decimal_literal(&self) -> bool {
        self.literal().contains('.')
    }

    /// Literal is exactly `"0"`.
    #[must_use]
    pub fn is_zero_literal(&self) -> bool {
        self.literal() == ZERO
    }

    /// Number literal starting with `-`.
    #[must_use]
    pub fn is_negative_literal(&self) -> bool {
        matches!(self, Self::Number(text) if text.starts_with('-'))
    }

    /// Literal with its leading `-` removed still parses as a number.
    #[must_use]
    pub fn has_numeric_tail(&self) -> bool {
        let literal = self.literal();
        literal.chars().count() > 1
            && literal
                .strip_prefix('-')
                .is_some_and(|tail| parse_literal(tail).is_some())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl From<String> for Token {
    fn from(literal: String) -> Self {
        Self::from_literal(&literal)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        match token {
            Token::Number(text) => text,
            other => other.literal().to_string(),
        }
    }
}

/// Parses a literal the way the evaluator reads it.
///
/// Rejects the textual spellings `inf`/`nan` that `f64::from_str` would
/// otherwise accept; only digit-based literals are numbers here.
fn parse_literal(text: &str) -> Option<f64> {
    let digits = text.trim_start_matches(['-', '+']);
    if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Converts a slice of literals into tokens.
///
/// Convenient for tests and for rebuilding an expression from history.
///
/// ```
/// use rpncalc::domain::token::tokens;
///
/// let expr = tokens(&["2", "+", "3"]);
/// assert_eq!(expr.len(), 3);
/// ```
#[must_use]
pub fn tokens(literals: &[&str]) -> Vec<Token> {
    literals.iter().map(|l| Token::from_literal(l)).collect()
}

/// Joins token literals without separators, the way the display shows them.
#[must_use]
pub fn join(expression: &[Token]) -> String {
    expression.iter().map(Token::literal).collect()
}

/// Expression is exactly `["0"]`.
#[must_use]
pub fn is_initial_expression(expression: &[Token]) -> bool {
    matches!(expression, [only] if only.is_zero_literal())
}

#[must_use]
pub const fn is_empty(expression: &[Token]) -> bool {
    expression.is_empty()
}

/// First token is the `Undefined` sentinel.
#[must_use]
pub fn is_error_state(expression: &[Token]) -> bool {
    matches!(expression.first(), Some(Token::Undefined))
}

/// Last token is the pending decimal literal `"0."`.
#[must_use]
pub fn is_pending_zero_decimal(expression: &[Token]) -> bool {
    expression.last().is_some_and(|t| t.literal() == "0.")
}

#[must_use]
pub fn open_paren_count(expression: &[Token]) -> usize {
    expression.iter().filter(|t| t.is_open_paren()).count()
}

#[must_use]
pub fn close_paren_count(expression: &[Token]) -> usize {
    expression.iter().filter(|t| t.is_close_paren()).count()
}

#[must_use]
pub fn numeric_count(expression: &[Token]) -> usize {
    expression.iter().filter(|t| t.is_number()).count()
}

#[must_use]
pub fn operator_count(expression: &[Token]) -> usize {
    expression.iter().filter(|t| t.is_operator()).count()
}

/// Canonicalizes a numeric literal.
///
/// Strips the sign, splits on the first `.`, removes leading zeros from the
/// integer part (keeping one `0` if nothing else remains), reattaches the
/// fractional part verbatim, then the sign. An empty fractional part drops the
/// dot, so `"3."` becomes `"3"`.
///
/// # Examples
///
/// ```
/// use rpncalc::domain::normalize_literal;
///
/// assert_eq!(normalize_literal("007"), "7");
/// assert_eq!(normalize_literal("-00.50"), "-0.50");
/// assert_eq!(normalize_literal("000"), "0");
/// assert_eq!(normalize_literal(""), "0");
/// ```
#[must_use]
pub fn normalize_literal(literal: &str) -> String {
    if literal.is_empty() {
        return ZERO.to_string();
    }

    let (negative, unsigned) = literal
        .strip_prefix('-')
        .map_or((false, literal), |rest| (true, rest));

    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let trimmed = integer.trim_start_matches('0');
    let integer = if trimmed.is_empty() { ZERO } else { trimmed };

    let body = if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    };

    if negative {
        format!("-{body}")
    } else {
        body
    }
}
