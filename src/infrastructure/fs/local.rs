//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::path::Path;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};
use crate::domain::value_objects::FileMetadata;

/// Local file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn stat(&self, path: &Path) -> FsResult<FileMetadata> {
        std::fs::metadata(path)
            .map(|m| FileMetadata::from(&m))
            .map_err(|e| FsError::from_io(e, path))
    }

    fn is_writable(&self, path: &Path) -> bool {
        let writable = |p: &Path| {
            std::fs::metadata(p)
                .map(|m| !m.permissions().readonly())
                .unwrap_or(false)
        };
        // Unlinking needs write access to the containing directory too.
        let parent_ok = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => writable(parent),
            _ => true,
        };
        parent_ok && writable(path)
    }

    fn remove_all(&self, path: &Path) -> FsResult<()> {
        let meta = std::fs::symlink_metadata(path).map_err(|e| FsError::from_io(e, path))?;
        let result = if meta.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        };
        result.map_err(|e| FsError::from_io(e, path))
    }
}
