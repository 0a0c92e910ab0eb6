//! Domain layer: the vocabulary shared by every other layer.
//!
//! This module holds the value types of the calculator, independent of how
//! input arrives or how results are shown.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`token`]: Expression tokens, predicates and literal normalization
//! - [`button`]: Button identifiers and their input categories
//!
//! # Examples
//!
//! ```
//! use rpncalc::domain::{normalize_literal, Token};
//!
//! let token = Token::number(normalize_literal("0042"));
//! assert_eq!(token.literal(), "42");
//! ```

pub mod button;
pub mod error;
pub mod token;

pub use button::{Button, ButtonCategory};
pub use error::{CalcError, Result};
pub use token::{normalize_literal, Operator, Token, UNDEFINED};
