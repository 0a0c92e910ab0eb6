//! One JSON line per finished span.
//!
//! ```json
//! {"start":"2026-10-17T09:12:03.120456Z","name":"handle_event","micros":84,
//!  "trace":"4bf9...","span":"00f0...","parent":"a3ce...",
//!  "fields":{"event_type":"Button(Equals)"},
//!  "events":[{"at_micros":61,"message":"result shown","fields":{"value":"NaN","display":"Undefined"}}]}
//! ```
//!
//! Bookkeeping attributes added by the tracing bridge (`code.*`, `thread.*`,
//! `busy_ns`, `idle_ns`, `target`) are left out. Non-finite numbers are
//! written as strings, since a failed evaluation records a NaN value.

use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde::Serialize;
use serde_json::{Map, Value as Json};
use std::time::SystemTime;

#[derive(Debug, Serialize)]
pub struct SpanRecord {
    start: String,
    name: String,
    micros: u64,
    trace: String,
    span: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    fields: Map<String, Json>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<EventRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct EventRecord {
    at_micros: u64,
    message: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    fields: Map<String, Json>,
}

impl From<&SpanData> for SpanRecord {
    fn from(span: &SpanData) -> Self {
        let context = &span.span_context;
        Self {
            start: DateTime::<Utc>::from(span.start_time).to_rfc3339_opts(SecondsFormat::Micros, true),
            name: span.name.to_string(),
            micros: micros_between(span.start_time, span.end_time),
            trace: context.trace_id().to_string(),
            span: context.span_id().to_string(),
            parent: (span.parent_span_id != SpanId::INVALID).then(|| span.parent_span_id.to_string()),
            fields: fields(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    at_micros: micros_between(span.start_time, event.timestamp),
                    message: event.name.to_string(),
                    fields: fields(&event.attributes),
                })
                .collect(),
            error: match &span.status {
                Status::Error { description } => Some(description.to_string()),
                Status::Unset | Status::Ok => None,
            },
        }
    }
}

fn micros_between(from: SystemTime, to: SystemTime) -> u64 {
    to.duration_since(from)
        .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
}

fn fields(attributes: &[KeyValue]) -> Map<String, Json> {
    attributes
        .iter()
        .filter(|kv| !is_bookkeeping(kv.key.as_str()))
        .map(|kv| (kv.key.to_string(), json(&kv.value)))
        .collect()
}

fn is_bookkeeping(key: &str) -> bool {
    key.starts_with("code.")
        || key.starts_with("thread.")
        || matches!(key, "busy_ns" | "idle_ns" | "target")
}

fn json(value: &Value) -> Json {
    match value {
        Value::Bool(b) => Json::Bool(*b),
        Value::I64(i) => Json::from(*i),
        Value::F64(f) => serde_json::Number::from_f64(*f).map_or_else(|| Json::String(f.to_string()), Json::Number),
        Value::String(s) => Json::String(s.to_string()),
        Value::Array(_) => Json::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_calculator_fields() {
        let attributes = [
            KeyValue::new("expression", "2+3"),
            KeyValue::new("code.lineno", 42_i64),
            KeyValue::new("thread.id", 1_i64),
            KeyValue::new("idle_ns", 100_i64),
            KeyValue::new("recording", true),
        ];
        let map = fields(&attributes);
        assert_eq!(map.len(), 2);
        assert_eq!(map["expression"], "2+3");
        assert_eq!(map["recording"], true);
    }

    #[test]
    fn non_finite_values_become_strings() {
        assert_eq!(json(&Value::F64(f64::NAN)), Json::String("NaN".to_string()));
        assert_eq!(json(&Value::F64(f64::INFINITY)), Json::String("inf".to_string()));
        assert_eq!(json(&Value::F64(1.5)), serde_json::json!(1.5));
        assert_eq!(json(&Value::I64(-3)), serde_json::json!(-3));
    }
}
