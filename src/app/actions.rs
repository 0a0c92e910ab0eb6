//! Effects returned by the event handler.
//!
//! The handler never performs I/O. Everything that leaves the store, from
//! redraw notifications to history writes, is described here and executed by
//! the runtime in `main.rs`.

use super::state::Snapshot;
use crate::storage::CalculationRecord;

/// Side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// The observable expression state changed; observers should redraw.
    ExpressionChanged(Snapshot),

    /// An evaluation succeeded and should be appended to history.
    SaveCalculation(CalculationRecord),

    /// The history record at this index (oldest is 0) should be removed
    /// from storage.
    DeleteCalculation(usize),

    /// All stored history should be removed.
    ClearHistory,

    /// Voice capture should start or stop.
    ToggleRecording {
        /// Capture is active after the toggle.
        recording: bool,
    },
}
