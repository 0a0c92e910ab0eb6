//! Application layer: the expression store and its input pipeline.
//!
//! # Architecture
//!
//! ```text
//! Button / Voice ─► Event ─► handle_event ─► AppState ─► Effects
//!                                  │            ▲
//!                                  ▼            │
//!                            InputProcessor ─► policies
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`handler`]: Event processing and the `handle` core operation
//! - [`modes`]: Calculator state machine
//! - [`policy`]: Append policies, one per input category
//! - [`processor`]: Applies policy decisions to an expression
//! - [`state`]: Expression store and published snapshots
//!
//! # Example
//!
//! ```rust
//! use rpncalc::app::{handle, AppState};
//! use rpncalc::Button;
//!
//! let mut state = AppState::default();
//! let snapshot = handle(&mut state, Button::Digit(4));
//! assert!(snapshot.allow_backspace);
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod policy;
pub mod processor;
pub mod state;

pub use actions::Effect;
pub use handler::{handle, handle_event, Event};
pub use modes::CalculatorState;
pub use processor::InputProcessor;
pub use state::{AppState, Snapshot};
