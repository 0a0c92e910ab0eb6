//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber: an env filter plus the OpenTelemetry
/// layer writing finished spans to the span log.
///
/// The filter comes from `RUST_LOG` when set, else from
/// `config.trace_level`, else `"info"`. If the trace directory cannot be
/// created, tracing stays off. Only the first call has any effect.
///
/// # Example
///
/// ```rust
/// use rpncalc::observability::init_tracing;
/// use rpncalc::Config;
///
/// let dir = std::env::temp_dir().join("rpncalc-doc-traces");
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     trace_file: Some(dir.join("traces.json")),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let trace_file = config
        .trace_file
        .clone()
        .unwrap_or_else(crate::infrastructure::trace_file);
    if let Some(parent) = trace_file.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let provider = exporter::provider(trace_file, config.trace_rotation);
    let tracer = provider.tracer(super::SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer);

    let _ = subscriber.try_init();
}
