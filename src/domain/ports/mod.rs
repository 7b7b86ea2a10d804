//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod directory_walker;
pub mod file_system;
pub mod mirror_events;
pub mod transform;

pub use directory_walker::DirectoryWalker;
pub use file_system::{FileSystem, FsError, FsResult};
pub use mirror_events::{emit_debug, EventSink, MirrorEvent, NoopEventSink, SkipReason};
pub use transform::{Transform, TransformError, TransformOutput};
