//! Execution flow capture for Prizm.
//!
//! A tracing layer that records the application's lifecycle and delivery
//! events as structured entries, and a recorder that collects and saves them.

pub mod flow_layer;
pub mod recorder;

pub use flow_layer::{ExecutionFlowLayer, FlowEntry, DEFAULT_TARGET_PREFIX};
pub use recorder::FlowRecorder;
