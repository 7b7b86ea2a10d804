//! Plain copy transform
//!
//! Writes through a temporary file in the destination directory and renames
//! it into place, so a reader never sees a half-written output.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::ports::{Transform, TransformError, TransformOutput};

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyTransform;

impl CopyTransform {
    pub fn new() -> Self {
        Self
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> TransformError + '_ {
    move |source| TransformError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl Transform for CopyTransform {
    fn name(&self) -> &str {
        "copy"
    }

    fn transform(&self, source: &Path, dest_dir: &Path) -> Result<TransformOutput, TransformError> {
        let name = source
            .file_name()
            .ok_or_else(|| TransformError::NoFileName(source.to_path_buf()))?;
        let dest = dest_dir.join(name);

        fs::create_dir_all(dest_dir).map_err(io_err(dest_dir))?;
        let mut input = File::open(source).map_err(io_err(source))?;
        let mut tmp = NamedTempFile::new_in(dest_dir).map_err(io_err(dest_dir))?;
        let bytes = io::copy(&mut input, &mut tmp).map_err(io_err(&dest))?;
        tmp.persist(&dest).map_err(|e| TransformError::Io {
            path: dest.clone(),
            source: e.error,
        })?;

        Ok(TransformOutput {
            path: dest,
            bytes: Some(bytes),
        })
    }
}
