//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod file_event;
mod file_metadata;
mod mirror_paths;
mod path_filter;

pub use file_event::{FileEventKind, PendingFileEvent};
pub use file_metadata::FileMetadata;
pub use mirror_paths::MirrorPaths;
pub use path_filter::{PathFilter, DEFAULT_EXTENSIONS, DEFAULT_IGNORE};
