//! Directory walker backed by the `ignore` crate
//!
//! Gitignore/hidden-file handling of the crate is switched off; the
//! [`PathFilter`] alone decides what is skipped, so a walk sees exactly
//! what the watch filter would accept.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::ports::{DirectoryWalker, FsError, FsResult};
use crate::domain::value_objects::PathFilter;

#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreWalker;

impl IgnoreWalker {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryWalker for IgnoreWalker {
    fn list(&self, dir: &Path, filter: &PathFilter) -> FsResult<Vec<PathBuf>> {
        let meta = std::fs::metadata(dir).map_err(|e| FsError::from_io(e, dir))?;
        if !meta.is_dir() {
            return Ok(Vec::new());
        }

        let entry_filter = filter.clone();
        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                entry.depth() == 0
                    || !entry_filter
                        .is_ignored(entry.path(), entry.file_type().is_some_and(|t| t.is_dir()))
            })
            .build();

        let mut files = Vec::new();
        for result in walker {
            match result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|t| t.is_file())
                        && filter.has_allowed_extension(entry.path())
                    {
                        files.push(entry.into_path());
                    }
                }
                // Entries deleted while the walk was in progress.
                Err(err)
                    if err
                        .io_error()
                        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound) => {}
                Err(err) => {
                    return Err(FsError::Io {
                        path: dir.to_path_buf(),
                        source: std::io::Error::other(err.to_string()),
                    })
                }
            }
        }

        files.sort();
        Ok(files)
    }
}
