//! Infix to postfix conversion (shunting-yard).
//!
//! Numbers go straight to the output. Operators wait on a stack until an
//! operator of lower precedence arrives; ties pop, which makes every operator
//! left-associative. Malformed input is not reported here: whatever comes out
//! is rejected by the evaluator.

use crate::domain::Token;

/// Converts an infix token sequence to postfix order.
///
/// # Examples
///
/// ```
/// use rpncalc::engine::rpn::to_rpn;
/// use rpncalc::domain::token::{join, tokens};
///
/// let rpn = to_rpn(&tokens(&["2", "+", "3", "×", "4"]));
/// assert_eq!(join(&rpn), "234×+");
/// ```
#[must_use]
pub fn to_rpn(infix: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(infix.len());
    let mut stack: Vec<Token> = Vec::new();

    for token in infix {
        match token {
            Token::OpenParen => stack.push(Token::OpenParen),
            Token::CloseParen => {
                while let Some(top) = stack.pop() {
                    if top.is_open_paren() {
                        break;
                    }
                    output.push(top);
                }
            }
            Token::Operator(current) => {
                while let Some(Token::Operator(top)) = stack.last() {
                    if top.precedence() < current.precedence() {
                        break;
                    }
                    output.push(Token::Operator(*top));
                    stack.pop();
                }
                stack.push(Token::Operator(*current));
            }
            operand => output.push(operand.clone()),
        }
    }

    output.extend(stack.into_iter().rev());

    tracing::trace!(infix_len = infix.len(), rpn_len = output.len(), "converted to rpn");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::{join, tokens};

    fn rpn(literals: &[&str]) -> String {
        join(&to_rpn(&tokens(literals)))
    }

    #[test]
    fn precedence() {
        assert_eq!(rpn(&["2", "×", "3", "+", "4"]), "23×4+");
        assert_eq!(rpn(&["2", "+", "3", "÷", "4"]), "234÷+");
    }

    #[test]
    fn left_associative() {
        assert_eq!(rpn(&["8", "-", "3", "-", "2"]), "83-2-");
        assert_eq!(rpn(&["8", "÷", "4", "×", "2"]), "84÷2×");
    }

    #[test]
    fn groups() {
        assert_eq!(rpn(&["(", "2", "+", "3", ")", "×", "4"]), "23+4×");
        assert_eq!(rpn(&["2", "×", "(", "3", "-", "(", "1", "+", "1", ")", ")"]), "2311+-×");
    }

    #[test]
    fn negative_literals_are_operands() {
        assert_eq!(rpn(&["-2", "×", "-3"]), "-2-3×");
        assert_eq!(to_rpn(&tokens(&["-2", "×", "-3"])).len(), 3);
    }

    #[test]
    fn unmatched_open_paren_is_emitted() {
        assert_eq!(rpn(&["(", "1", "+", "2"]), "12+(");
    }
}
