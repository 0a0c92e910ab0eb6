//! Event handling and state transition logic.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the keypad, the voice recognizer or storage
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Effects are collected and returned for execution
//!
//! Every event that changes the observable state yields exactly one
//! [`Effect::ExpressionChanged`] carrying the new [`Snapshot`].
//!
//! # Example
//!
//! ```rust
//! use rpncalc::app::{handle_event, AppState, Event};
//! use rpncalc::Button;
//!
//! let mut state = AppState::default();
//! let (changed, effects) = handle_event(&mut state, &Event::Button(Button::Digit(7)))?;
//! assert!(changed);
//! assert_eq!(effects.len(), 1);
//! # Ok::<(), rpncalc::CalcError>(())
//! ```

use super::actions::Effect;
use super::state::{AppState, Snapshot};
use crate::domain::error::{CalcError, Result};
use crate::domain::{Button, ButtonCategory};
use crate::storage::CalculationRecord;

/// Inputs to the expression store.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keypad button was pressed.
    Button(Button),

    /// The speech recognizer produced a (partial) transcript.
    ///
    /// Mapped with [`crate::voice::recognized_final_token`]; unrecognized
    /// text is ignored.
    Voice(String),

    /// Stored calculations were loaded at startup.
    HistoryLoaded(Vec<CalculationRecord>),

    /// Puts the result of history entry `index` (oldest is 0) back on the
    /// display.
    RecallResult(usize),

    /// Removes history entry `index` (oldest is 0).
    DeleteCalculation(usize),

    /// Removes every history entry.
    ClearHistory,
}

/// Processes an event, mutates application state, and returns effects.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// `(changed, effects)`: whether the display must be refreshed, and the side
/// effects to execute in order.
///
/// # Errors
///
/// Returns [`CalcError::Storage`] when a recalled or deleted history index
/// does not exist. Button and voice events never fail.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Effect>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Button(button) => Ok(press(state, *button)),
        Event::Voice(text) => {
            let Some(button) = crate::voice::recognized_final_token(text) else {
                tracing::debug!("transcript not recognized");
                return Ok((false, vec![]));
            };
            Ok(press(state, button))
        }
        Event::HistoryLoaded(records) => {
            tracing::debug!(count = records.len(), "history loaded");
            state.load_history(records);
            Ok((false, vec![]))
        }
        Event::RecallResult(index) => {
            let literal = state
                .history
                .get(*index)
                .map(|record| record.result.clone())
                .ok_or_else(|| CalcError::Storage(format!("no calculation at index {index}")))?;

            let before = state.snapshot();
            state.recall(&literal);
            Ok(publish(state, &before, vec![]))
        }
        Event::DeleteCalculation(index) => {
            let removed = state
                .forget(*index)
                .ok_or_else(|| CalcError::Storage(format!("no calculation at index {index}")))?;
            tracing::debug!(index, expression = %removed.expression, "calculation forgotten");
            Ok((false, vec![Effect::DeleteCalculation(*index)]))
        }
        Event::ClearHistory => {
            tracing::debug!(count = state.history.len(), "history cleared");
            state.history.clear();
            Ok((false, vec![Effect::ClearHistory]))
        }
    }
}

/// Presses a button and returns the resulting snapshot.
///
/// This is the core operation of the store: it is total and ignores effects
/// other than the state change itself.
///
/// ```
/// use rpncalc::app::{handle, AppState};
/// use rpncalc::Button;
///
/// let mut state = AppState::default();
/// for button in [Button::Digit(2), Button::Add, Button::Digit(3), Button::Equals] {
///     handle(&mut state, button);
/// }
/// assert_eq!(state.snapshot().display_text(), "5");
/// ```
pub fn handle(state: &mut AppState, button: Button) -> Snapshot {
    let _span = tracing::debug_span!("handle", button = %button).entered();
    press(state, button);
    state.snapshot()
}

fn press(state: &mut AppState, button: Button) -> (bool, Vec<Effect>) {
    if !state.accepts(button) {
        tracing::debug!(button = %button, "ignored while showing Undefined");
        return (false, vec![]);
    }

    let before = state.snapshot();
    let mut effects = vec![];

    match button.category() {
        ButtonCategory::Number
        | ButtonCategory::Operator
        | ButtonCategory::Parenthesis
        | ButtonCategory::Decimal
        | ButtonCategory::Backspace => {
            state.apply_input(button);
        }
        ButtonCategory::Clear => state.clear(),
        ButtonCategory::Equals => {
            if let Some(record) = state.evaluate() {
                effects.push(Effect::SaveCalculation(record));
            }
        }
        ButtonCategory::Mic => {
            let recording = state.toggle_recording();
            tracing::debug!(recording, "voice capture toggled");
            effects.push(Effect::ToggleRecording { recording });
        }
    }

    publish(state, &before, effects)
}

/// Prepends a change notification when the snapshot differs from `before`.
fn publish(state: &AppState, before: &Snapshot, mut effects: Vec<Effect>) -> (bool, Vec<Effect>) {
    let after = state.snapshot();
    let changed = !same_snapshot(before, &after);
    if changed {
        effects.insert(0, Effect::ExpressionChanged(after));
    }
    (changed, effects)
}

/// Snapshot equality that treats two NaN results as equal.
fn same_snapshot(a: &Snapshot, b: &Snapshot) -> bool {
    let same_result = a.result == b.result || (a.result.is_nan() && b.result.is_nan());
    a.expression == b.expression
        && a.state == b.state
        && a.allow_backspace == b.allow_backspace
        && same_result
}
