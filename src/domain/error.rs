//! Error types for the calculator.
//!
//! The expression engine itself is total: malformed input is ignored and
//! arithmetic failure is reported as NaN. The variants here cover the layers
//! around it, namely history persistence, configuration loading and voice
//! input. All errors are implemented with `thiserror`.

use thiserror::Error;

/// The main error type for `rpncalc` operations outside the pure engine.
///
/// # Examples
///
/// ```
/// use rpncalc::CalcError;
///
/// fn read_history() -> Result<(), CalcError> {
///     Err(CalcError::Storage("history file is locked".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum CalcError {
    /// History storage operation failed.
    ///
    /// Covers JSON (de)serialization failures and lookups of records that
    /// do not exist.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is unreadable or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Voice transcript could not be handed to the engine.
    #[error("Voice input error: {0}")]
    Voice(String),
}

/// A specialized `Result` type for `rpncalc` operations.
pub type Result<T> = std::result::Result<T, CalcError>;
