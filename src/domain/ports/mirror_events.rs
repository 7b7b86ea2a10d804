//! Mirror Event Port
//!
//! Provides an observable interface for the watch pipeline and the batch
//! compressor. Enables console output, NDJSON event streams, and testing.

use serde::Serialize;

use crate::domain::value_objects::FileEventKind;

/// Why a path was dropped instead of processed or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Source vanished before its quiet period ended
    SourceMissing,
    /// Source is a directory; its files arrive on their own
    IsDirectory,
    /// Source has zero bytes (usually still being written)
    EmptyFile,
    /// Destination is at least as new as the source
    UpToDate,
    /// Nothing to delete at the destination
    DestinationMissing,
    /// Destination exists but cannot be deleted
    DestinationReadOnly,
    /// Outside the `--after`/`--before` window
    OutsideWindow,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::SourceMissing => "source missing",
            SkipReason::IsDirectory => "is a directory",
            SkipReason::EmptyFile => "empty file",
            SkipReason::UpToDate => "up to date",
            SkipReason::DestinationMissing => "destination missing",
            SkipReason::DestinationReadOnly => "destination not writable",
            SkipReason::OutsideWindow => "outside time window",
        }
    }
}

/// Event emitted by the mirror core.
///
/// Serialized as `{"event": "<snake_case>", ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MirrorEvent {
    /// Watch started
    WatchStarted {
        source: String,
        dest: String,
        transform: String,
    },
    /// Watcher registered and initial scan queued
    Ready { source: String, initial_files: usize },
    /// Raw notification accepted by the filter
    RawEvent { kind: FileEventKind, path: String },
    /// Raw notification rejected by the filter
    Ignored { path: String },
    /// A new directory check was created
    DirectoryArmed { dir: String },
    /// An existing directory check absorbed another event
    DirectoryHit { dir: String, hit_count: u32 },
    /// A directory check expired and its files were re-recorded
    Reconcile {
        dir: String,
        hit_count: u32,
        files: usize,
    },
    /// A task was handed to the scheduler
    TaskQueued {
        source: String,
        dest: String,
        size: u64,
    },
    /// A path was dropped
    Skipped { path: String, reason: SkipReason },
    /// The transform succeeded
    Processed {
        source: String,
        dest: String,
        source_bytes: u64,
        output_bytes: Option<u64>,
    },
    /// A destination counterpart was deleted
    Removed { path: String },
    /// The transform failed for one task
    TransformFailed {
        source: String,
        dest: String,
        size: u64,
        message: String,
    },
    /// A batch handler panicked; its batch was dropped
    HandlerPanicked { dropped: usize, message: String },
    /// The watch primitive reported an error; notifications may be lost
    WatcherError { message: String },
    /// Non-fatal configuration problem
    ConfigWarning {
        key: String,
        file: String,
        suggestion: Option<String>,
    },
    /// Any other failure surfaced by the core
    Error { message: String },
    /// Batch compression finished
    CompressComplete {
        processed: usize,
        skipped: usize,
        failed: usize,
    },
    /// Watch stopped
    Shutdown,
}

impl MirrorEvent {
    /// Per-path chatter only shown at higher verbosity.
    pub fn is_debug(&self) -> bool {
        matches!(
            self,
            MirrorEvent::RawEvent { .. }
                | MirrorEvent::Ignored { .. }
                | MirrorEvent::DirectoryArmed { .. }
                | MirrorEvent::DirectoryHit { .. }
                | MirrorEvent::TaskQueued { .. }
        )
    }

    /// Failures that belong on stderr.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            MirrorEvent::TransformFailed { .. }
                | MirrorEvent::HandlerPanicked { .. }
                | MirrorEvent::WatcherError { .. }
                | MirrorEvent::Error { .. }
        )
    }

    /// Convert to a JSON string with a `"command"` field included
    pub fn to_json(&self, command: &str) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!(command));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Trait for receiving mirror events
///
/// Implementations must not panic or block for long: they are called from
/// the control loop and the scheduler worker alike.
pub trait EventSink: Send + Sync {
    /// Handle an event
    fn on_event(&self, event: MirrorEvent);

    /// Check if this sink wants debug events (raw notifications, arming)
    fn wants_debug_events(&self) -> bool {
        false
    }
}

/// Helper to skip building debug events nobody will see.
pub fn emit_debug(sink: &dyn EventSink, event: impl FnOnce() -> MirrorEvent) {
    if sink.wants_debug_events() {
        sink.on_event(event());
    }
}

/// No-op event sink for silent operation
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn on_event(&self, _event: MirrorEvent) {}
}
