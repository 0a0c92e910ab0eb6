//! Evaluation pipeline: sanitize, check, convert, evaluate, format.
//!
//! ```text
//! tokens ─► sanitizer ─► validity ─► rpn ─► evaluator ─► formatter ─► tokens
//! ```
//!
//! Every stage is a pure function. The expression store in [`crate::app`]
//! drives them when equals is pressed.
//!
//! # Modules
//!
//! - [`sanitizer`]: trailing repair and the validity gate
//! - [`rpn`]: shunting-yard conversion
//! - [`evaluator`]: postfix stack machine
//! - [`formatter`]: result rendering policy

pub mod evaluator;
pub mod formatter;
pub mod rpn;
pub mod sanitizer;

pub use evaluator::evaluate;
pub use formatter::FormatPolicy;
pub use rpn::to_rpn;
pub use sanitizer::{check, sanitize, Sanitized, Validity};

use crate::domain::Token;

/// Evaluates an infix expression that already passed [`check`].
///
/// ```
/// use rpncalc::engine::calculate;
/// use rpncalc::domain::token::tokens;
///
/// assert_eq!(calculate(&tokens(&["(", "2", "+", "3", ")", "×", "4"])), 20.0);
/// ```
#[must_use]
pub fn calculate(infix: &[Token]) -> f64 {
    let rpn = to_rpn(infix);
    let value = evaluate(&rpn);
    tracing::debug!(rpn = %crate::domain::token::join(&rpn), value, "expression evaluated");
    value
}
