//! Compress Use Case
//!
//! One-shot batch pass over the source tree: every accepted file whose
//! modification time falls inside the optional window is run through the
//! transform, subject to the same staleness check as the watcher unless
//! `force` is set. Runs synchronously on the calling thread.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::dispatch::{DispatchOutcome, Dispatcher};
use crate::application::processor::TransformHandler;
use crate::domain::ports::{
    DirectoryWalker, EventSink, FileSystem, FsError, MirrorEvent, SkipReason, Transform,
};
use crate::domain::value_objects::{MirrorPaths, PathFilter};
use crate::error::{MirrorError, MirrorResult};

/// Options for a compress run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressOptions {
    /// Only files modified at or after this instant
    pub after: Option<DateTime<Utc>>,
    /// Only files modified at or before this instant
    pub before: Option<DateTime<Utc>>,
    /// Process even when the output is newer than the source
    pub force: bool,
}

impl CompressOptions {
    fn in_window(&self, modified: DateTime<Utc>) -> bool {
        self.after.map_or(true, |after| modified >= after)
            && self.before.map_or(true, |before| modified <= before)
    }
}

/// Counts for one compress run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl CompressSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

pub struct CompressUseCase<F: FileSystem, W: DirectoryWalker> {
    dispatcher: Dispatcher<F>,
    walker: W,
    filter: PathFilter,
    handler: TransformHandler,
    sink: Arc<dyn EventSink>,
    options: CompressOptions,
}

impl<F: FileSystem, W: DirectoryWalker> CompressUseCase<F, W> {
    pub fn new(
        paths: MirrorPaths,
        fs: F,
        walker: W,
        filter: PathFilter,
        transform: Arc<dyn Transform>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(paths, fs, Arc::clone(&sink)),
            walker,
            filter,
            handler: TransformHandler::new(transform, Arc::clone(&sink)),
            sink,
            options: CompressOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompressOptions) -> Self {
        self.dispatcher = self.dispatcher.with_skip_up_to_date(!options.force);
        self.options = options;
        self
    }

    pub fn run(&self) -> MirrorResult<CompressSummary> {
        let root = self.dispatcher.paths().source_root();
        let files = self.walker.list(root, &self.filter).map_err(|e| match e {
            FsError::NotFound(path) => MirrorError::DirectoryNotFound { path },
            other => other.into(),
        })?;

        let mut summary = CompressSummary::default();
        for file in files {
            if !self.within_window(&file) {
                summary.skipped += 1;
                continue;
            }
            match self.dispatcher.prepare_update(&file) {
                Ok(DispatchOutcome::Task(task)) => {
                    if self.handler.run_task(&task) {
                        summary.processed += 1;
                    } else {
                        summary.failed += 1;
                    }
                }
                Ok(DispatchOutcome::Skipped(_) | DispatchOutcome::Removed) => summary.skipped += 1,
                Err(e) => {
                    self.sink.on_event(MirrorEvent::Error {
                        message: format!("{}: {e}", file.display()),
                    });
                    summary.failed += 1;
                }
            }
        }

        self.sink.on_event(MirrorEvent::CompressComplete {
            processed: summary.processed,
            skipped: summary.skipped,
            failed: summary.failed,
        });
        Ok(summary)
    }

    fn within_window(&self, file: &std::path::Path) -> bool {
        if self.options.after.is_none() && self.options.before.is_none() {
            return true;
        }
        // A file that cannot be stat'ed is left to prepare_update to report.
        let Ok(stat) = self.dispatcher.fs().stat(file) else {
            return true;
        };
        if self.options.in_window(DateTime::<Utc>::from(stat.modified_at)) {
            return true;
        }
        self.sink.on_event(MirrorEvent::Skipped {
            path: file.display().to_string(),
            reason: SkipReason::OutsideWindow,
        });
        false
    }
}
