//! Mirror pipeline
//!
//! The state machine behind the watch loop. Owns both buffers, so the loop
//! that feeds it is the only place they are touched:
//!
//! ```text
//! raw event ─┬─> filter ─> DebounceBuffer ──sweep──> Dispatcher ─> TaskScheduler
//!            └──────────> ReconcileBuffer ──sweep──> walker ─> DebounceBuffer
//! ```
//!
//! Nothing here reads a clock; every entry point takes `now`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::application::dispatch::{DispatchOutcome, Dispatcher};
use crate::application::scheduler::TaskScheduler;
use crate::domain::entities::ProcessingTask;
use crate::domain::ports::{
    emit_debug, DirectoryWalker, EventSink, FileSystem, FsError, MirrorEvent,
};
use crate::domain::services::{
    resolve_event_dir, DebounceBuffer, DirectoryCheck, Observation, ReconcileBuffer,
};
use crate::domain::value_objects::{FileEventKind, MirrorPaths, PathFilter, PendingFileEvent};

use super::options::WatchOptions;

pub struct MirrorPipeline<F: FileSystem, W: DirectoryWalker> {
    filter: PathFilter,
    debounce: DebounceBuffer,
    reconcile: ReconcileBuffer,
    dispatcher: Dispatcher<F>,
    walker: W,
    scheduler: TaskScheduler<ProcessingTask>,
    sink: Arc<dyn EventSink>,
}

impl<F: FileSystem, W: DirectoryWalker> MirrorPipeline<F, W> {
    pub fn new(
        options: &WatchOptions,
        filter: PathFilter,
        fs: F,
        walker: W,
        scheduler: TaskScheduler<ProcessingTask>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let paths = MirrorPaths::new(&options.source, &options.dest);
        Self {
            filter,
            debounce: DebounceBuffer::new(options.debounce, options.debounce_check),
            reconcile: ReconcileBuffer::new(
                &options.source,
                options.reconcile,
                options.reconcile_check,
            ),
            dispatcher: Dispatcher::new(paths, fs, Arc::clone(&sink)),
            walker,
            scheduler,
            sink,
        }
    }

    pub fn debounce(&self) -> &DebounceBuffer {
        &self.debounce
    }

    pub fn reconcile(&self) -> &ReconcileBuffer {
        &self.reconcile
    }

    pub fn scheduler(&self) -> &TaskScheduler<ProcessingTask> {
        &self.scheduler
    }

    /// Accept one raw change notification.
    pub fn ingest(&mut self, kind: FileEventKind, path: PathBuf, now: Instant) {
        let is_dir = self
            .dispatcher
            .fs()
            .stat(&path)
            .map(|m| m.is_directory)
            .unwrap_or(false);

        if !self.accepts(kind, &path, is_dir) {
            emit_debug(self.sink.as_ref(), || MirrorEvent::Ignored {
                path: path.display().to_string(),
            });
            return;
        }
        emit_debug(self.sink.as_ref(), || MirrorEvent::RawEvent {
            kind,
            path: path.display().to_string(),
        });

        let event_dir = resolve_event_dir(&path, is_dir);
        self.debounce.record(path, kind, now);

        match self.reconcile.observe(&event_dir, now) {
            Observation::Armed { dir } => {
                emit_debug(self.sink.as_ref(), || MirrorEvent::DirectoryArmed {
                    dir: dir.display().to_string(),
                });
            }
            Observation::Hit { dir, hit_count } => {
                emit_debug(self.sink.as_ref(), || MirrorEvent::DirectoryHit {
                    dir: dir.display().to_string(),
                    hit_count,
                });
            }
            Observation::OutsideRoot => {}
        }
    }

    /// Run whichever buffer sweeps are due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for event in self.debounce.sweep(now) {
            self.dispatch(&event);
        }
        for check in self.reconcile.sweep(now) {
            self.reconcile_dir(&check, now);
        }
    }

    /// Record every accepted file under the source root as an update.
    ///
    /// Returns how many files were recorded.
    pub fn initial_scan(&mut self, now: Instant) -> usize {
        let root = self.dispatcher.paths().source_root().to_path_buf();
        match self.walker.list(&root, &self.filter) {
            Ok(files) => {
                let count = files.len();
                for file in files {
                    self.debounce.record(file, FileEventKind::Update, now);
                }
                count
            }
            Err(e) => {
                self.sink.on_event(MirrorEvent::Error {
                    message: format!("initial scan of {} failed: {e}", root.display()),
                });
                0
            }
        }
    }

    fn accepts(&self, kind: FileEventKind, path: &Path, is_dir: bool) -> bool {
        if self.filter.is_ignored(path, is_dir) {
            return false;
        }
        if is_dir || self.filter.has_allowed_extension(path) {
            return true;
        }
        match kind {
            FileEventKind::Update => false,
            // A removed source can no longer be stat'ed; a directory
            // counterpart at the destination tells us what it was.
            FileEventKind::Remove => self
                .dispatcher
                .paths()
                .dest_path_for(path)
                .ok()
                .and_then(|dest| self.dispatcher.fs().stat(&dest).ok())
                .is_some_and(|m| m.is_directory),
        }
    }

    fn dispatch(&self, event: &PendingFileEvent) {
        match self.dispatcher.dispatch(event) {
            Ok(DispatchOutcome::Task(task)) => {
                emit_debug(self.sink.as_ref(), || MirrorEvent::TaskQueued {
                    source: task.source_path.display().to_string(),
                    dest: task.dest_path.display().to_string(),
                    size: task.source_stat.size,
                });
                self.scheduler.push(task);
            }
            Ok(DispatchOutcome::Removed | DispatchOutcome::Skipped(_)) => {}
            Err(e) => self.sink.on_event(MirrorEvent::Error {
                message: format!("{}: {e}", event.path.display()),
            }),
        }
    }

    fn reconcile_dir(&mut self, check: &DirectoryCheck, now: Instant) {
        let files = match self.walker.list(&check.dir_path, &self.filter) {
            Ok(files) => files,
            // The directory went away with its files; removals cover it.
            Err(FsError::NotFound(_)) => Vec::new(),
            Err(e) => {
                self.sink.on_event(MirrorEvent::Error {
                    message: format!("reconcile of {} failed: {e}", check.dir_path.display()),
                });
                return;
            }
        };

        let count = files.len();
        for file in files {
            self.debounce.record(file, FileEventKind::Update, now);
        }
        self.sink.on_event(MirrorEvent::Reconcile {
            dir: check.dir_path.display().to_string(),
            hit_count: check.hit_count,
            files: count,
        });
    }
}
