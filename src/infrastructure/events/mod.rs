//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for scripts/automation
//! - ConsoleEventSink (in `ui`): human-readable progress

mod json;

pub use json::JsonEventSink;
