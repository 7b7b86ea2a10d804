//! Stat snapshot used for skip and staleness decisions

use std::fs::Metadata;
use std::time::SystemTime;

/// Read-only snapshot of a file's metadata, captured once and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    pub size: u64,
    pub modified_at: SystemTime,
    pub is_directory: bool,
}

impl FileMetadata {
    pub fn file(size: u64, modified_at: SystemTime) -> Self {
        Self {
            size,
            modified_at,
            is_directory: false,
        }
    }

    pub fn directory(modified_at: SystemTime) -> Self {
        Self {
            size: 0,
            modified_at,
            is_directory: true,
        }
    }

    /// A destination is current when it was written no earlier than the source.
    pub fn is_up_to_date_with(&self, source: &FileMetadata) -> bool {
        self.modified_at >= source.modified_at
    }
}

impl From<&Metadata> for FileMetadata {
    fn from(meta: &Metadata) -> Self {
        Self {
            size: meta.len(),
            // Epoch when the platform has no mtime
            modified_at: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            is_directory: meta.is_dir(),
        }
    }
}
