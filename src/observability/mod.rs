//! Tracing setup and the span log.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer → SpanLog → traces.json
//! ```
//!
//! Each finished span becomes one compact JSON line carrying the fields the
//! calculator records (button, expression, result value) and the events
//! emitted inside it. The file is `<data dir>/traces.json` unless
//! `trace_file` is configured, and rotates into numbered backups.
//!
//! The filter comes from `RUST_LOG`, then `trace_level` in the configuration
//! file, then `"info"`.

mod exporter;
mod init;
mod log_file;
mod span_record;

pub use init::init_tracing;
pub use log_file::Rotation;

/// Service and instrumentation scope name.
pub const SERVICE_NAME: &str = "rpncalc";
