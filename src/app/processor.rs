//! Input processor: turns policy actions into the next token sequence.
//!
//! The processor is the only place that edits an expression in response to a
//! key press. For each button it asks the matching policy for an action and
//! applies it to a copy of the current expression. It owns the
//! "negative number pending" flag; recalculation mode belongs to the store
//! and is passed in.
//!
//! Clear, equals and the microphone key are not handled here, the store deals
//! with them directly.

use super::policy::{
    backspace, decimal, number, operator, parenthesis, BackspaceAction, DecimalAction,
    NumberAction, OperatorAction, Paren, ParenAction,
};
use crate::domain::token::{normalize_literal, Operator, Token};
use crate::domain::Button;

/// Applies append policies to an expression.
///
/// # Example
///
/// ```rust
/// use rpncalc::app::InputProcessor;
/// use rpncalc::domain::{token::tokens, Button};
///
/// let mut processor = InputProcessor::new();
/// let next = processor.process(Button::Subtract, &tokens(&["("]), false);
/// assert!(processor.is_negative_pending());
/// let next = processor.process(Button::Digit(4), &next, false);
/// assert_eq!(next, tokens(&["(", "-4"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputProcessor {
    /// The trailing lone `-` is a sign waiting for its digits.
    negative_pending: bool,
}

impl InputProcessor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            negative_pending: false,
        }
    }

    /// Builds a processor with an explicit starting flag, mainly for tests.
    #[must_use]
    pub const fn with_negative_pending(negative_pending: bool) -> Self {
        Self { negative_pending }
    }

    #[must_use]
    pub const fn is_negative_pending(&self) -> bool {
        self.negative_pending
    }

    /// Forgets any pending sign. Called on clear and after evaluation.
    pub fn reset(&mut self) {
        self.negative_pending = false;
    }

    /// Computes the expression that results from pressing `button`.
    ///
    /// Returns the input unchanged for buttons that are not editing keys.
    ///
    /// # Parameters
    ///
    /// * `button` - Key that was pressed
    /// * `expression` - Current token sequence
    /// * `recalculating` - The previous input completed an evaluation
    #[must_use]
    pub fn process(&mut self, button: Button, expression: &[Token], recalculating: bool) -> Vec<Token> {
        match button {
            Button::Digit(digit) => self.append_number(digit, expression, recalculating),
            Button::Add | Button::Subtract | Button::Multiply | Button::Divide => {
                let Some(op) = button.operator() else {
                    return expression.to_vec();
                };
                self.append_operator(op, expression)
            }
            Button::OpenParen => Self::append_parenthesis(Paren::Open, expression, recalculating),
            Button::CloseParen => Self::append_parenthesis(Paren::Close, expression, recalculating),
            Button::Decimal => self.append_decimal(expression, recalculating),
            Button::Backspace => self.remove_last(expression),
            Button::Equals | Button::Clear | Button::Mic => expression.to_vec(),
        }
    }

    fn append_number(&mut self, digit: u8, expression: &[Token], recalculating: bool) -> Vec<Token> {
        let symbol = Button::Digit(digit).symbol();
        let action = number::decide(expression, recalculating, self.negative_pending);
        self.negative_pending = false;

        let mut next = expression.to_vec();
        match action {
            NumberAction::StartNewExpression => return vec![Token::number(symbol)],
            NumberAction::ReplaceLastWithNegative => {
                next.pop();
                next.push(Token::number(format!("-{symbol}")));
            }
            NumberAction::AppendDigitToLast => {
                if let Some(last) = next.last_mut() {
                    let joined = format!("{}{symbol}", last.literal());
                    *last = Token::number(normalize_literal(&joined));
                }
            }
            NumberAction::ImplicitMultiplyAndAppend => {
                next.push(Token::Operator(Operator::Multiply));
                next.push(Token::number(symbol));
            }
            NumberAction::AppendNewToken => next.push(Token::number(symbol)),
        }
        next
    }

    fn append_operator(&mut self, op: Operator, expression: &[Token]) -> Vec<Token> {
        let action = operator::decide(expression, op);

        let mut next = expression.to_vec();
        match action {
            OperatorAction::AppendAndMarkNegative => {
                next.push(Token::Operator(op));
                self.negative_pending = true;
            }
            OperatorAction::NoChange => {}
            OperatorAction::DropLast => {
                next.pop();
                self.negative_pending = false;
            }
            OperatorAction::ReplaceLastOperator => {
                next.pop();
                next.push(Token::Operator(op));
                self.negative_pending = false;
            }
            OperatorAction::AppendOperator => {
                next.push(Token::Operator(op));
                self.negative_pending = false;
            }
        }
        next
    }

    fn append_parenthesis(paren: Paren, expression: &[Token], recalculating: bool) -> Vec<Token> {
        let token = match paren {
            Paren::Open => Token::OpenParen,
            Paren::Close => Token::CloseParen,
        };

        let mut next = expression.to_vec();
        match parenthesis::decide(expression, paren, recalculating) {
            ParenAction::StartNewOpen => return vec![token],
            ParenAction::ImplicitMultiplyAndOpen => {
                next.push(Token::Operator(Operator::Multiply));
                next.push(token);
            }
            ParenAction::AppendOpen | ParenAction::AppendClose => next.push(token),
            ParenAction::NoChange => {}
        }
        next
    }

    fn append_decimal(&mut self, expression: &[Token], recalculating: bool) -> Vec<Token> {
        let action = decimal::decide(expression, recalculating, self.negative_pending);
        if action != DecimalAction::NoChange {
            self.negative_pending = false;
        }

        let mut next = expression.to_vec();
        match action {
            DecimalAction::NoChange => {}
            DecimalAction::FuseWithSign => {
                next.pop();
                next.push(Token::number("-0."));
            }
            DecimalAction::AppendZeroDecimal => next.push(Token::number("0.")),
            DecimalAction::StartNewDecimal => return vec![Token::number("0.")],
            DecimalAction::AppendDecimalToLast => {
                if let Some(last) = next.last_mut() {
                    *last = Token::number(format!("{}.", last.literal()));
                }
            }
        }
        next
    }

    fn remove_last(&mut self, expression: &[Token]) -> Vec<Token> {
        let mut next = expression.to_vec();
        match backspace::decide(expression) {
            BackspaceAction::NoChange => return next,
            BackspaceAction::ClearAll => return vec![Token::zero()],
            BackspaceAction::TrimLastChar => {
                if let Some(last) = next.last_mut() {
                    let mut literal = last.literal().to_string();
                    literal.pop();
                    *last = Token::from_literal(strip_dangling_exponent(&literal));
                }
            }
            BackspaceAction::DropLastToken => {
                next.pop();
                if next.is_empty() {
                    next.push(Token::zero());
                }
            }
        }

        self.negative_pending = is_sign_position(&next);
        next
    }
}

/// Drops an exponent marker left without digits, so `1e-` trims to `1`.
fn strip_dangling_exponent(literal: &str) -> &str {
    let without_sign = literal.trim_end_matches(['+', '-']);
    match without_sign.strip_suffix(['e', 'E']) {
        Some(mantissa) if !mantissa.is_empty() => mantissa,
        _ => literal,
    }
}

/// Trailing lone `-` sits where it can only be a sign: at the start, after
/// `(`, or after `×`/`÷`.
fn is_sign_position(expression: &[Token]) -> bool {
    match expression {
        [.., before, last] if last.is_subtract() => {
            before.is_open_paren() || before.is_high_priority_operator()
        }
        [only] => only.is_subtract(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::tokens;

    fn press_all(processor: &mut InputProcessor, start: &[Token], buttons: &[Button]) -> Vec<Token> {
        buttons
            .iter()
            .fold(start.to_vec(), |expr, b| processor.process(*b, &expr, false))
    }

    #[test]
    fn digits_strip_leading_zeros() {
        let mut p = InputProcessor::new();
        let expr = press_all(
            &mut p,
            &tokens(&["2", "+"]),
            &[Button::Digit(0), Button::Digit(0), Button::Digit(5)],
        );
        assert_eq!(expr, tokens(&["2", "+", "5"]));
    }

    #[test]
    fn negative_number_after_multiply() {
        let mut p = InputProcessor::new();
        let expr = press_all(
            &mut p,
            &tokens(&["3"]),
            &[Button::Multiply, Button::Subtract, Button::Digit(2), Button::Digit(1)],
        );
        assert_eq!(expr, tokens(&["3", "×", "-21"]));
        assert!(!p.is_negative_pending());
    }

    #[test]
    fn implicit_multiplication() {
        let mut p = InputProcessor::new();
        let expr = press_all(&mut p, &tokens(&["5"]), &[Button::OpenParen]);
        assert_eq!(expr, tokens(&["5", "×", "("]));

        let expr = press_all(&mut p, &tokens(&["(", "1", ")"]), &[Button::Digit(2)]);
        assert_eq!(expr, tokens(&["(", "1", ")", "×", "2"]));
    }

    #[test]
    fn decimal_entry() {
        let mut p = InputProcessor::new();
        let expr = press_all(
            &mut p,
            &tokens(&["1", "+"]),
            &[Button::Decimal, Button::Digit(5), Button::Decimal],
        );
        assert_eq!(expr, tokens(&["1", "+", "0.5"]));

        let expr = p.process(Button::Decimal, &tokens(&["7"]), true);
        assert_eq!(expr, tokens(&["0."]));
    }

    #[test]
    fn backspace_rearms_sign() {
        let mut p = InputProcessor::new();
        let expr = press_all(
            &mut p,
            &tokens(&["("]),
            &[Button::Subtract, Button::Digit(5), Button::Backspace],
        );
        assert_eq!(expr, tokens(&["(", "-"]));
        assert!(p.is_negative_pending());

        let expr = p.process(Button::Digit(7), &expr, false);
        assert_eq!(expr, tokens(&["(", "-7"]));
    }

    #[test]
    fn backspace_bottoms_out_at_zero() {
        let mut p = InputProcessor::new();
        let mut expr = tokens(&["12", "+", "(", "3."]);
        for _ in 0..10 {
            expr = p.process(Button::Backspace, &expr, false);
        }
        assert_eq!(expr, tokens(&["0"]));
    }

    #[test]
    fn decimal_after_sign_starts_negative_fraction() {
        let mut p = InputProcessor::new();
        let expr = press_all(
            &mut p,
            &tokens(&["3"]),
            &[Button::Multiply, Button::Subtract, Button::Decimal, Button::Digit(5)],
        );
        assert_eq!(expr, tokens(&["3", "×", "-0.5"]));
        assert!(!p.is_negative_pending());
    }

    #[test]
    fn backspace_through_exponent() {
        let mut p = InputProcessor::new();
        let expr = p.process(Button::Backspace, &tokens(&["1e-05"]), false);
        assert_eq!(expr, tokens(&["1e-0"]));

        let expr = p.process(Button::Backspace, &expr, false);
        assert_eq!(expr, tokens(&["1"]));
        assert!(expr[0].is_number());

        let expr = p.process(Button::Backspace, &tokens(&["2.5e+"]), false);
        assert_eq!(expr, tokens(&["2.5"]));
    }

    #[test]
    fn backspace_clears_error() {
        let mut p = InputProcessor::new();
        assert_eq!(p.process(Button::Backspace, &tokens(&["Undefined"]), true), tokens(&["0"]));
    }
}
