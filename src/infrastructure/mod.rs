//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where configuration, history and trace files live. Everything
//! here is a pure path computation; directories are created by the layer
//! that writes into them.

pub mod paths;

pub use paths::{config_dir, config_file, data_dir, expand_tilde, history_file, trace_file};
