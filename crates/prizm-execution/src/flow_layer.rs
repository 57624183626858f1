//! Custom tracing layer capturing execution flow events.
//!
//! Events from the application layer (session lifecycle, delivery ticks) are
//! forwarded as [`FlowEntry`] records over a tokio channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::span::{Attributes, Id};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Events whose target starts with this prefix are captured by default.
pub const DEFAULT_TARGET_PREFIX: &str = "prizm_application";

/// One captured event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEntry {
    /// RFC 3339 capture time
    pub timestamp: String,
    /// Event target (e.g., "prizm_application::delivery::scheduler")
    pub target: String,
    /// Log level (INFO, DEBUG, WARN, ERROR)
    pub level: String,
    /// Human-readable message
    pub message: String,
    /// Structured fields from the event, plus those of its current span
    pub fields: HashMap<String, Value>,
}

/// Span fields, stored in the span's extensions when it is created.
struct SpanFields(HashMap<String, Value>);

/// A tracing layer that sends matching events to a channel.
pub struct ExecutionFlowLayer {
    sender: mpsc::UnboundedSender<FlowEntry>,
    target_prefix: String,
}

impl ExecutionFlowLayer {
    /// Creates a layer capturing application-layer events.
    pub fn new(sender: mpsc::UnboundedSender<FlowEntry>) -> Self {
        Self::with_target_prefix(sender, DEFAULT_TARGET_PREFIX)
    }

    pub fn with_target_prefix(
        sender: mpsc::UnboundedSender<FlowEntry>,
        target_prefix: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            target_prefix: target_prefix.into(),
        }
    }

    fn captures(&self, target: &str) -> bool {
        target.starts_with(&self.target_prefix)
    }
}

impl<S> Layer<S> for ExecutionFlowLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        if !self.captures(attrs.metadata().target()) {
            return;
        }
        let mut fields = HashMap::new();
        attrs.record(&mut FieldVisitor(&mut fields));
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(SpanFields(fields));
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !self.captures(metadata.target()) {
            return;
        }

        let mut fields = HashMap::new();
        if let Some(span) = ctx.event_span(event) {
            if let Some(stored) = span.extensions().get::<SpanFields>() {
                fields.extend(stored.0.clone());
            }
        }
        event.record(&mut FieldVisitor(&mut fields));

        let message = fields
            .remove("message")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        let entry = FlowEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            target: metadata.target().to_string(),
            level: metadata.level().to_string(),
            message,
            fields,
        };

        // The receiver may be gone during shutdown; dropping the entry is fine.
        let _ = self.sender.send(entry);
    }
}

/// Field visitor that extracts tracing fields into a HashMap.
struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}
