//! Error types for treemirror
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{FsError, TransformError};

/// Result type alias for treemirror operations
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Main error type for treemirror operations
#[derive(Error, Debug)]
pub enum MirrorError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File system port error (stat, walk, delete)
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Transform executor error
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Path is not inside the configured source root
    #[error("path '{path}' is outside source root '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },

    /// Mirroring into the watched tree would feed on its own output
    #[error("destination '{dest}' is inside source '{source_root}'")]
    DestinationInsideSource { dest: PathBuf, source_root: PathBuf },

    /// Config file could not be parsed or failed validation
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Ignore glob could not be compiled
    #[error("invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The file watcher could not be started
    #[error("watcher error: {0}")]
    Watch(#[from] notify::Error),
}
