//! treemirror - keep a destination tree in step with a source tree
//!
//! treemirror watches a directory, coalesces bursts of change notifications
//! per file and per directory, and runs a transform (a copy by default, or
//! any external command) for each settled file, writing the result to the
//! mirrored location under the destination root. Removals are mirrored as
//! deletions.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use application::{
    CompressOptions, CompressSummary, CompressUseCase, TaskScheduler, WatchOptions, WatchUseCase,
};
pub use config::{Config, ConfigWarning};
pub use domain::ports::{EventSink, MirrorEvent, SkipReason, Transform};
pub use domain::value_objects::{FileEventKind, MirrorPaths, PathFilter};
pub use error::{MirrorError, MirrorResult};
