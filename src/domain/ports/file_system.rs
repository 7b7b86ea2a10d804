//! FileSystem port - abstraction over the stat/delete calls the core makes
//!
//! This trait allows the buffers and dispatcher to be driven against an
//! in-memory file system in tests.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::FileMetadata;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
///
/// `NotFound` is kept apart from everything else: a vanished path is benign,
/// any other failure propagates.
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io { path: PathBuf, source: std::io::Error },
}

impl FsError {
    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "file not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "permission denied: {}", path.display())
            }
            FsError::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - `MemoryFs` (tests) - in-memory metadata table
pub trait FileSystem {
    /// Stat a path. A missing path is `FsError::NotFound`.
    fn stat(&self, path: &Path) -> FsResult<FileMetadata>;

    /// Whether the current process may delete or replace `path`.
    fn is_writable(&self, path: &Path) -> bool;

    /// Remove a file, or a directory and everything below it.
    fn remove_all(&self, path: &Path) -> FsResult<()>;
}
