//! Storage record models for the history layer.
//!
//! Records are written after a successful evaluation and read back when the
//! application starts. They are plain data, separate from the live
//! expression store.

use serde::{Deserialize, Serialize};

/// One finished calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Sanitized infix expression that was evaluated, as displayed.
    pub expression: String,

    /// Formatted result literal, e.g. `"14"` or `"1.2e+10"`.
    pub result: String,

    /// Unix timestamp of the evaluation.
    pub created_at: i64,
}

impl CalculationRecord {
    /// Creates a record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use rpncalc::storage::CalculationRecord;
    ///
    /// let record = CalculationRecord::new("2+3", "5");
    /// assert_eq!(record.expression, "2+3");
    /// assert_eq!(record.result, "5");
    /// ```
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}
