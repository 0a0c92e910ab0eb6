//! Append policies: one ordered decision table per input category.
//!
//! Each policy is a pure function from the current expression (plus the mode
//! flags it needs) to a closed action enum. Checks run top to bottom and the
//! first match wins. The [`InputProcessor`](super::processor::InputProcessor)
//! interprets the returned action; policies never mutate anything.
//!
//! # Modules
//!
//! - [`number`]: digit keys
//! - [`operator`]: `+ - × ÷`
//! - [`parenthesis`]: `(` and `)`
//! - [`decimal`]: the decimal point
//! - [`backspace`]: deleting the last character or token

pub mod backspace;
pub mod decimal;
pub mod number;
pub mod operator;
pub mod parenthesis;

pub use backspace::BackspaceAction;
pub use decimal::DecimalAction;
pub use number::NumberAction;
pub use operator::OperatorAction;
pub use parenthesis::{Paren, ParenAction};
