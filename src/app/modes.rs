//! Calculator state machine modes.
//!
//! ```text
//!              digit / op / paren / .            =
//!  Initial ───────────────────────────► EnteringElement ─────────► CalculatedResult
//!     ▲                                        ▲                          │
//!     │ AC                                     └──── any edit ────────────┘
//!     └───────────────────────────────────── AC ───────────────────────────
//! ```
//!
//! `CalculatedResult` doubles as the "recalculation" flag the append
//! policies consult: the displayed value is a result, so a digit or decimal
//! point starts a new expression instead of extending it.

use serde::{Deserialize, Serialize};

/// Coarse state of the expression store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CalculatorState {
    /// Expression is `["0"]` and nothing has been typed since the last clear.
    #[default]
    Initial,

    /// The user is building an expression.
    EnteringElement,

    /// The expression holds a single result token or `Undefined`.
    CalculatedResult,
}

impl CalculatorState {
    /// The previous input completed an evaluation.
    #[must_use]
    pub const fn is_recalculating(self) -> bool {
        matches!(self, Self::CalculatedResult)
    }
}
