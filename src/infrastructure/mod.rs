//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system and directory walker
//! - `transform/` - Copy and external-command transforms
//! - `watch/` - `notify` adapter
//! - `events/` - NDJSON event sink

pub mod events;
pub mod fs;
pub mod transform;
pub mod watch;

// Re-export for convenience
pub use events::JsonEventSink;
pub use fs::{IgnoreWalker, LocalFs};
pub use transform::{CommandTransform, CopyTransform};
pub use watch::{NotifyWatchAdapter, WatchMessage};
