//! Storage layer for calculation history.
//!
//! Persistence is optional: the calculator works without it. When enabled,
//! every successful evaluation is appended to a JSON file and the list is
//! loaded back on start.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `models`: Stored record types

pub mod backend;
pub mod json;
pub mod models;

pub use backend::Storage;
pub use json::JsonStorage;
pub use models::CalculationRecord;
