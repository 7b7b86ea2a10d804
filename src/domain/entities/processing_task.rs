//! Processing task entity

use std::path::{Path, PathBuf};

use crate::domain::value_objects::FileMetadata;

/// A single unit of transform work.
///
/// Created when an `Update` survives its quiet period and the staleness
/// check; consumed exactly once by the scheduler's handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingTask {
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
    pub source_stat: FileMetadata,
}

impl ProcessingTask {
    pub fn new(source_path: PathBuf, dest_path: PathBuf, source_stat: FileMetadata) -> Self {
        Self {
            source_path,
            dest_path,
            source_stat,
        }
    }

    /// Directory the transform writes into.
    pub fn dest_dir(&self) -> &Path {
        self.dest_path.parent().unwrap_or(&self.dest_path)
    }
}
