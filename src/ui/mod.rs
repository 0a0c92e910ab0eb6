//! Terminal presentation layer.
//!
//! ```text
//! Snapshot → UIViewModel::from_snapshot → render → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready text and localization options
//! - [`renderer`]: Line-oriented output

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_history, render_to};
pub use viewmodel::{DisplayOptions, UIViewModel};
