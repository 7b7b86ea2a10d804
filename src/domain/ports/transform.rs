//! Transform port - the "process file" step

use std::path::{Path, PathBuf};

use thiserror::Error;

/// What a transform wrote. Only success or failure is relied upon; the rest
/// feeds the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub path: PathBuf,
    pub bytes: Option<u64>,
}

/// Transform executor errors
#[derive(Error, Debug)]
pub enum TransformError {
    /// The source path has no file name component
    #[error("source has no file name: {0}")]
    NoFileName(PathBuf),

    /// Reading the source or writing the output failed
    #[error("I/O error processing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external program could not be started
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external program ran but reported failure
    #[error("`{program}` exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Produces the processed counterpart of `source` inside `dest_dir`.
///
/// Must be callable from the scheduler's worker thread.
pub trait Transform: Send + Sync {
    /// Short label for logs (`copy`, the program name, ...).
    fn name(&self) -> &str;

    fn transform(&self, source: &Path, dest_dir: &Path) -> Result<TransformOutput, TransformError>;
}
