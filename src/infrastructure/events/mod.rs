//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for CI/automation
//! - Console sinks live in `ui::views`

mod json;

pub use json::JsonEventSink;
