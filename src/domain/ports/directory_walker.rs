//! DirectoryWalker port - enumerates files below a directory

use std::path::{Path, PathBuf};

use super::file_system::FsResult;
use crate::domain::value_objects::PathFilter;

/// Lists every regular file under a directory that the filter accepts.
///
/// Used by reconciliation re-scans, the initial scan and the batch
/// `compress` command.
pub trait DirectoryWalker {
    /// `FsError::NotFound` when `dir` itself does not exist.
    fn list(&self, dir: &Path, filter: &PathFilter) -> FsResult<Vec<PathBuf>>;
}
