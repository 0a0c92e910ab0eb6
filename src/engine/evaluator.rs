//! Stack-machine evaluation of a postfix token sequence.
//!
//! Failure is signalled in-band with NaN: division by zero, a missing operand,
//! a token that is not a number or operator, or operands left over at the end.

use crate::domain::{Operator, Token};

/// Evaluates a postfix sequence.
///
/// Returns `0.0` for an empty sequence.
///
/// # Examples
///
/// ```
/// use rpncalc::engine::evaluator::evaluate;
/// use rpncalc::domain::token::tokens;
///
/// assert_eq!(evaluate(&tokens(&["10", "4", "-"])), 6.0);
/// assert!(evaluate(&tokens(&["5", "0", "÷"])).is_nan());
/// assert!(evaluate(&tokens(&["5", "+"])).is_nan());
/// ```
#[must_use]
pub fn evaluate(rpn: &[Token]) -> f64 {
    let mut stack: Vec<f64> = Vec::with_capacity(rpn.len());

    for token in rpn {
        if let Some(value) = token.value() {
            stack.push(value);
            continue;
        }

        let Some(op) = token.as_operator() else {
            tracing::debug!(token = %token, "unexpected token in rpn sequence");
            return f64::NAN;
        };

        let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
            tracing::debug!(operator = %op, "operand stack underflow");
            return f64::NAN;
        };

        let result = apply(op, left, right);
        if result.is_nan() {
            tracing::debug!(operator = %op, left, right, "arithmetic failure");
            return f64::NAN;
        }
        stack.push(result);
    }

    match stack.as_slice() {
        [] => 0.0,
        [value] => *value,
        rest => {
            tracing::debug!(leftover = rest.len(), "operands left on stack");
            f64::NAN
        }
    }
}

fn apply(op: Operator, left: f64, right: f64) -> f64 {
    match op {
        Operator::Add => left + right,
        Operator::Subtract => left - right,
        Operator::Multiply => left * right,
        Operator::Divide => {
            if right == 0.0 {
                f64::NAN
            } else {
                left / right
            }
        }
    }
}
