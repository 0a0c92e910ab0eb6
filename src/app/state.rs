//! Expression store: the single owner of the current expression.
//!
//! [`AppState`] holds the token sequence, the calculator mode, the last raw
//! result and the input processor. The handler drives it one button at a
//! time and reads a [`Snapshot`] back after every event.
//!
//! # Invariants
//!
//! - The expression is never empty; its floor is `["0"]`.
//! - `CalculatedResult` implies the expression is a single number token or
//!   `["Undefined"]`.
//! - While the expression is `["Undefined"]`, only clear, backspace and the
//!   microphone key are accepted.
//!
//! # Example
//!
//! ```rust
//! use rpncalc::app::{AppState, CalculatorState};
//! use rpncalc::domain::Button;
//!
//! let mut state = AppState::default();
//! for button in [Button::Digit(6), Button::Divide, Button::Digit(4)] {
//!     state.apply_input(button);
//! }
//! let record = state.evaluate();
//! assert_eq!(state.snapshot().display_text(), "1.5");
//! assert_eq!(state.state, CalculatorState::CalculatedResult);
//! assert_eq!(record.map(|r| r.expression), Some("6÷4".to_string()));
//! ```

use super::modes::CalculatorState;
use super::processor::InputProcessor;
use crate::domain::token::{self, Token};
use crate::domain::{Button, ButtonCategory};
use crate::engine::{self, FormatPolicy, Sanitized, Validity};
use crate::storage::json::DEFAULT_HISTORY_LIMIT;
use crate::storage::CalculationRecord;

/// Observable state published after every event.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Current token sequence.
    pub expression: Vec<Token>,

    /// Current mode.
    pub state: CalculatorState,

    /// The delete key should read `⌫` rather than `AC`.
    pub allow_backspace: bool,

    /// Raw value of the last evaluation; NaN after a failed one.
    pub result: f64,
}

impl Snapshot {
    /// Expression joined the way the display shows it.
    #[must_use]
    pub fn display_text(&self) -> String {
        token::join(&self.expression)
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current token sequence. Never empty.
    pub expression: Vec<Token>,

    /// Current mode. `CalculatedResult` is the recalculation flag.
    pub state: CalculatorState,

    /// Raw value of the last evaluation.
    pub result: f64,

    /// Append policy driver; owns the pending negative sign.
    pub processor: InputProcessor,

    /// Result rendering thresholds.
    pub format: FormatPolicy,

    /// Calculations loaded from storage plus those completed this session,
    /// oldest first.
    pub history: Vec<CalculationRecord>,

    /// Records kept in `history`; matches the storage retention limit so
    /// indices agree with the history file.
    pub history_limit: usize,

    /// Voice capture is active.
    pub recording: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FormatPolicy::default())
    }
}

impl AppState {
    /// Creates a store showing `0`.
    ///
    /// # Parameters
    ///
    /// * `format` - Thresholds used when rendering results
    #[must_use]
    pub fn new(format: FormatPolicy) -> Self {
        Self {
            expression: vec![Token::zero()],
            state: CalculatorState::Initial,
            result: 0.0,
            processor: InputProcessor::new(),
            format,
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            recording: false,
        }
    }

    /// Sets the number of history records kept. Zero is treated as one.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self.trim_history();
        self
    }

    /// Replaces the history with stored records, keeping the newest ones.
    pub fn load_history(&mut self, records: &[CalculationRecord]) {
        self.history = records.to_vec();
        self.trim_history();
    }

    /// Removes the history record at `index` (oldest is 0).
    pub fn forget(&mut self, index: usize) -> Option<CalculationRecord> {
        (index < self.history.len()).then(|| self.history.remove(index))
    }

    #[must_use]
    pub const fn is_recalculating(&self) -> bool {
        self.state.is_recalculating()
    }

    /// The expression is the `Undefined` sentinel.
    #[must_use]
    pub fn is_error(&self) -> bool {
        token::is_error_state(&self.expression)
    }

    /// Backspace is meaningful: not showing a result and not at `["0"]`.
    #[must_use]
    pub fn allow_backspace(&self) -> bool {
        !self.is_recalculating() && !token::is_initial_expression(&self.expression)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            expression: self.expression.clone(),
            state: self.state,
            allow_backspace: self.allow_backspace(),
            result: self.result,
        }
    }

    /// Whether `button` may act on the current expression.
    ///
    /// Everything except clear, backspace and the microphone is refused
    /// while `Undefined` is displayed.
    #[must_use]
    pub fn accepts(&self, button: Button) -> bool {
        if !self.is_error() {
            return true;
        }
        matches!(
            button.category(),
            ButtonCategory::Clear | ButtonCategory::Backspace | ButtonCategory::Mic
        )
    }

    /// Runs an editing key through the input processor.
    ///
    /// Any change to the expression ends recalculation mode. Returns `true`
    /// when the expression changed.
    pub fn apply_input(&mut self, button: Button) -> bool {
        let next = self
            .processor
            .process(button, &self.expression, self.is_recalculating());

        if next == self.expression {
            tracing::trace!(button = %button, "input left expression unchanged");
            return false;
        }

        self.expression = next;
        self.state = if token::is_initial_expression(&self.expression) {
            CalculatorState::Initial
        } else {
            CalculatorState::EnteringElement
        };
        tracing::debug!(
            button = %button,
            expression = %token::join(&self.expression),
            "expression edited"
        );
        true
    }

    /// Resets to `["0"]` and forgets any pending sign.
    pub fn clear(&mut self) {
        self.expression = vec![Token::zero()];
        self.state = CalculatorState::Initial;
        self.result = 0.0;
        self.processor.reset();
    }

    /// Handles equals: sanitize, check, evaluate, render.
    ///
    /// Returns the record to persist when a finite result was produced.
    /// Sanitizer repairs are kept even when the check then declines to
    /// evaluate.
    pub fn evaluate(&mut self) -> Option<CalculationRecord> {
        let repaired = match engine::sanitize(&self.expression) {
            Sanitized::Emptied => {
                self.clear();
                return None;
            }
            Sanitized::Ready(repaired) => repaired,
        };
        self.expression = repaired;

        match engine::check(&self.expression) {
            Validity::Incomplete => {
                tracing::debug!(expression = %token::join(&self.expression), "equals ignored");
                None
            }
            Validity::Malformed => {
                tracing::debug!(expression = %token::join(&self.expression), "malformed expression");
                self.show_result(f64::NAN);
                None
            }
            Validity::Valid => {
                let infix = token::join(&self.expression);
                let value = engine::calculate(&self.expression);
                self.show_result(value);

                if !value.is_finite() {
                    return None;
                }
                let record = CalculationRecord::new(infix, token::join(&self.expression));
                self.history.push(record.clone());
                self.trim_history();
                Some(record)
            }
        }
    }

    /// Puts a previously rendered result literal on the display.
    pub fn recall(&mut self, literal: &str) {
        let token = Token::from_literal(literal);
        self.result = token.value().unwrap_or(f64::NAN);
        self.expression = if token.is_number() {
            vec![token]
        } else {
            vec![Token::Undefined]
        };
        self.state = CalculatorState::CalculatedResult;
        self.processor.reset();
    }

    /// Flips voice capture. Returns the new value.
    pub fn toggle_recording(&mut self) -> bool {
        self.recording = !self.recording;
        self.recording
    }

    fn trim_history(&mut self) {
        let excess = self.history.len().saturating_sub(self.history_limit);
        if excess > 0 {
            self.history.drain(..excess);
        }
    }

    fn show_result(&mut self, value: f64) {
        self.result = value;
        self.expression = self.format.render(value);
        self.state = CalculatorState::CalculatedResult;
        self.processor.reset();
        tracing::debug!(value, display = %token::join(&self.expression), "result shown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::tokens;

    fn with_expression(literals: &[&str]) -> AppState {
        let mut state = AppState::default();
        state.expression = tokens(literals);
        state.state = CalculatorState::EnteringElement;
        state
    }

    #[test]
    fn evaluate_respects_precedence() {
        let mut state = with_expression(&["2", "+", "3", "×", "4"]);
        let record = state.evaluate();
        assert_eq!(state.expression, tokens(&["14"]));
        assert!((state.result - 14.0).abs() < f64::EPSILON);
        assert_eq!(record, state.history.last().cloned());
    }

    #[test]
    fn evaluate_repairs_before_checking() {
        let mut state = with_expression(&["(", "2", "+", "3", "×"]);
        state.evaluate();
        assert_eq!(state.expression, tokens(&["5"]));
    }

    #[test]
    fn incomplete_keeps_repairs() {
        let mut state = with_expression(&["3."]);
        assert_eq!(state.evaluate(), None);
        assert_eq!(state.expression, tokens(&["3"]));
        assert_eq!(state.state, CalculatorState::EnteringElement);
    }

    #[test]
    fn emptied_resets() {
        let mut state = with_expression(&["(", "-"]);
        assert_eq!(state.evaluate(), None);
        assert_eq!(state.expression, tokens(&["0"]));
        assert_eq!(state.state, CalculatorState::Initial);
    }

    #[test]
    fn division_by_zero_is_undefined_and_not_recorded() {
        let mut state = with_expression(&["5", "÷", "0"]);
        assert_eq!(state.evaluate(), None);
        assert!(state.is_error());
        assert!(state.result.is_nan());
        assert!(state.history.is_empty());
    }

    #[test]
    fn error_state_refuses_editing_keys() {
        let mut state = with_expression(&["Undefined"]);
        assert!(!state.accepts(Button::Digit(1)));
        assert!(!state.accepts(Button::Equals));
        assert!(state.accepts(Button::Backspace));
        assert!(state.accepts(Button::Clear));
    }

    #[test]
    fn history_keeps_newest_within_limit() {
        let mut state = AppState::default().with_history_limit(2);
        for literals in [["1", "+", "1"], ["2", "+", "2"], ["3", "+", "3"]] {
            state.expression = tokens(&literals);
            state.state = CalculatorState::EnteringElement;
            state.evaluate();
        }
        let kept: Vec<_> = state.history.iter().map(|r| r.expression.as_str()).collect();
        assert_eq!(kept, ["2+2", "3+3"]);

        state.load_history(&[
            CalculationRecord::new("1", "1"),
            CalculationRecord::new("2", "2"),
            CalculationRecord::new("3", "3"),
        ]);
        assert_eq!(state.history[0].result, "2");
    }

    #[test]
    fn forget_removes_by_index() {
        let mut state = AppState::default();
        state.load_history(&[CalculationRecord::new("1+1", "2"), CalculationRecord::new("2+2", "4")]);
        assert_eq!(state.forget(0).map(|r| r.result), Some("2".to_string()));
        assert_eq!(state.forget(5), None);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn recall_enters_recalculation() {
        let mut state = AppState::default();
        state.recall("1.5");
        assert_eq!(state.expression, tokens(&["1.5"]));
        assert!(state.is_recalculating());
        assert!(!state.allow_backspace());
    }
}
