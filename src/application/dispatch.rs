//! Expiry dispatch
//!
//! Turns a debounced event into its action: an `Update` becomes a
//! `ProcessingTask` (or is dropped), a `Remove` deletes the destination
//! counterpart (or is dropped). Drops are benign and reported to the sink;
//! only unexpected stat or delete failures come back as errors.

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::ProcessingTask;
use crate::domain::ports::{EventSink, FileSystem, FsError, MirrorEvent, SkipReason};
use crate::domain::value_objects::{FileEventKind, MirrorPaths, PendingFileEvent};
use crate::error::MirrorResult;

/// What happened to a dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The update produced a task for the scheduler.
    Task(ProcessingTask),
    /// The destination counterpart was deleted.
    Removed,
    /// Dropped without action.
    Skipped(SkipReason),
}

pub struct Dispatcher<F: FileSystem> {
    paths: MirrorPaths,
    fs: F,
    sink: Arc<dyn EventSink>,
    skip_up_to_date: bool,
}

impl<F: FileSystem> Dispatcher<F> {
    pub fn new(paths: MirrorPaths, fs: F, sink: Arc<dyn EventSink>) -> Self {
        Self {
            paths,
            fs,
            sink,
            skip_up_to_date: true,
        }
    }

    /// Disable the staleness check (`compress --force`).
    pub fn with_skip_up_to_date(mut self, skip: bool) -> Self {
        self.skip_up_to_date = skip;
        self
    }

    pub fn paths(&self) -> &MirrorPaths {
        &self.paths
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn dispatch(&self, event: &PendingFileEvent) -> MirrorResult<DispatchOutcome> {
        match event.kind {
            FileEventKind::Update => self.prepare_update(&event.path),
            FileEventKind::Remove => self.apply_remove(&event.path),
        }
    }

    /// Stat the source and destination and decide whether the transform
    /// should run.
    pub fn prepare_update(&self, source: &Path) -> MirrorResult<DispatchOutcome> {
        let source_stat = match self.fs.stat(source) {
            Ok(stat) => stat,
            Err(FsError::NotFound(_)) => return Ok(self.skip(source, SkipReason::SourceMissing)),
            Err(e) => return Err(e.into()),
        };
        if source_stat.is_directory {
            return Ok(self.skip(source, SkipReason::IsDirectory));
        }
        if source_stat.size == 0 {
            return Ok(self.skip(source, SkipReason::EmptyFile));
        }

        let dest_path = self.paths.dest_path_for(source)?;

        if self.skip_up_to_date {
            match self.fs.stat(&dest_path) {
                Ok(dest_stat) if dest_stat.is_up_to_date_with(&source_stat) => {
                    return Ok(self.skip(source, SkipReason::UpToDate));
                }
                Ok(_) | Err(FsError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(DispatchOutcome::Task(ProcessingTask::new(
            source.to_path_buf(),
            dest_path,
            source_stat,
        )))
    }

    /// Delete the destination counterpart of a removed source.
    pub fn apply_remove(&self, source: &Path) -> MirrorResult<DispatchOutcome> {
        let dest_path = self.paths.dest_path_for(source)?;

        match self.fs.stat(&dest_path) {
            Ok(_) => {}
            Err(FsError::NotFound(_)) => {
                return Ok(self.skip(&dest_path, SkipReason::DestinationMissing))
            }
            Err(e) => return Err(e.into()),
        }
        if !self.fs.is_writable(&dest_path) {
            return Ok(self.skip(&dest_path, SkipReason::DestinationReadOnly));
        }

        match self.fs.remove_all(&dest_path) {
            Ok(()) => {}
            // Raced with another delete.
            Err(FsError::NotFound(_)) => {
                return Ok(self.skip(&dest_path, SkipReason::DestinationMissing))
            }
            Err(FsError::PermissionDenied(_)) => {
                return Ok(self.skip(&dest_path, SkipReason::DestinationReadOnly))
            }
            Err(e) => return Err(e.into()),
        }

        self.sink.on_event(MirrorEvent::Removed {
            path: dest_path.display().to_string(),
        });
        Ok(DispatchOutcome::Removed)
    }

    fn skip(&self, path: &Path, reason: SkipReason) -> DispatchOutcome {
        self.sink.on_event(MirrorEvent::Skipped {
            path: path.display().to_string(),
            reason,
        });
        DispatchOutcome::Skipped(reason)
    }
}
