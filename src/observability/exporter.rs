//! Span exporter writing [`SpanRecord`] lines to a [`LogFile`].

use super::log_file::{LogFile, Rotation};
use super::span_record::SpanRecord;
use futures_util::future::{self, BoxFuture, FutureExt};
use opentelemetry::trace::TraceError;
use opentelemetry::KeyValue;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

#[derive(Debug)]
struct SpanLog {
    file: LogFile,
    closed: bool,
}

impl SpanLog {
    fn write(&self, batch: &[SpanData]) -> ExportResult {
        if self.closed {
            return Err(TraceError::from("span log is closed"));
        }
        for span in batch {
            let line = serde_json::to_string(&SpanRecord::from(span))
                .map_err(|e| TraceError::from(e.to_string()))?;
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))?;
        }
        Ok(())
    }
}

impl SpanExporter for SpanLog {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        future::ready(self.write(&batch)).boxed()
    }

    fn shutdown(&mut self) {
        self.closed = true;
    }
}

/// Builds a provider that writes each span to `path` as soon as it ends.
///
/// A calculator session is short and may end on Ctrl-D at any moment, so
/// export is synchronous rather than batched.
pub fn provider(path: PathBuf, rotation: Rotation) -> TracerProvider {
    let resource = Resource::new([KeyValue::new("service.name", super::SERVICE_NAME)]);
    let exporter = SpanLog {
        file: LogFile::new(path, rotation),
        closed: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
