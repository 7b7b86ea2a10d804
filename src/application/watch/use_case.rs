//! Watch Use Case implementation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Instant;

use crate::application::processor::TransformHandler;
use crate::application::roots::resolve_roots;
use crate::application::scheduler::TaskScheduler;
use crate::domain::ports::{DirectoryWalker, EventSink, FileSystem, MirrorEvent, Transform};
use crate::domain::value_objects::{PathFilter, DEFAULT_EXTENSIONS, DEFAULT_IGNORE};
use crate::error::MirrorResult;
use crate::infrastructure::fs::{IgnoreWalker, LocalFs};
use crate::infrastructure::watch::{NotifyWatchAdapter, WatchMessage};

use super::options::WatchOptions;
use super::pipeline::MirrorPipeline;

/// Watch Use Case
///
/// Keeps a destination tree in step with a source tree until the running
/// flag is cleared. This is the entry point for `treemirror watch`.
pub struct WatchUseCase {
    options: WatchOptions,
    ignore: Vec<String>,
    extensions: Vec<String>,
    transform: Arc<dyn Transform>,
}

impl WatchUseCase {
    pub fn new(options: WatchOptions, transform: Arc<dyn Transform>) -> Self {
        Self {
            options,
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            transform,
        }
    }

    /// Replace the ignore globs and extension allow-list.
    pub fn with_filter(mut self, ignore: Vec<String>, extensions: Vec<String>) -> Self {
        self.ignore = ignore;
        self.extensions = extensions;
        self
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Start watching (blocking)
    ///
    /// Returns once `running` is cleared. Setup failures (missing source,
    /// watcher registration) are returned; everything after that is
    /// reported to `sink` and the loop keeps going.
    pub fn start(&self, running: Arc<AtomicBool>, sink: Arc<dyn EventSink>) -> MirrorResult<()> {
        let (source, dest) = resolve_roots(&self.options.source, &self.options.dest)?;
        let options = WatchOptions {
            source: source.clone(),
            dest: dest.clone(),
            ..self.options.clone()
        };

        sink.on_event(MirrorEvent::WatchStarted {
            source: source.display().to_string(),
            dest: dest.display().to_string(),
            transform: self.transform.name().to_string(),
        });

        let filter = PathFilter::new(&source, &self.ignore, &self.extensions)?;
        let handler = TransformHandler::new(Arc::clone(&self.transform), Arc::clone(&sink));
        let scheduler =
            TaskScheduler::with_batch_size(handler, options.batch_size, Arc::clone(&sink));
        let mut pipeline = MirrorPipeline::new(
            &options,
            filter,
            LocalFs::new(),
            IgnoreWalker::new(),
            scheduler,
            Arc::clone(&sink),
        );

        let (tx, rx) = channel();
        let adapter = NotifyWatchAdapter::start(&source, tx)?;

        let initial_files = if options.initial_scan {
            pipeline.initial_scan(Instant::now())
        } else {
            0
        };
        sink.on_event(MirrorEvent::Ready {
            source: source.display().to_string(),
            initial_files,
        });

        run_loop(&mut pipeline, &rx, &running, &options, sink.as_ref());

        drop(adapter);
        sink.on_event(MirrorEvent::Shutdown);
        Ok(())
    }
}

/// The control loop: the only code that touches the buffers.
fn run_loop<F: FileSystem, W: DirectoryWalker>(
    pipeline: &mut MirrorPipeline<F, W>,
    rx: &Receiver<WatchMessage>,
    running: &AtomicBool,
    options: &WatchOptions,
    sink: &dyn EventSink,
) {
    let mut watcher_alive = true;

    while running.load(Ordering::SeqCst) {
        if watcher_alive {
            match rx.recv_timeout(options.poll_interval) {
                Ok(message) => {
                    handle_message(pipeline, message, sink);
                    drain_queued(pipeline, rx, sink);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    sink.on_event(MirrorEvent::WatcherError {
                        message: "watcher stopped delivering events".to_string(),
                    });
                    watcher_alive = false;
                }
            }
        } else {
            std::thread::sleep(options.poll_interval);
        }

        pipeline.tick(Instant::now());
    }
}

/// Most notifications handled between two ticks, so a steady stream cannot
/// hold the sweeps off.
const MAX_DRAIN: usize = 1024;

/// Handle up to [`MAX_DRAIN`] notifications that are already queued.
fn drain_queued<F: FileSystem, W: DirectoryWalker>(
    pipeline: &mut MirrorPipeline<F, W>,
    rx: &Receiver<WatchMessage>,
    sink: &dyn EventSink,
) -> usize {
    let mut handled = 0;
    while handled < MAX_DRAIN {
        let Ok(message) = rx.try_recv() else {
            break;
        };
        handle_message(pipeline, message, sink);
        handled += 1;
    }
    handled
}

fn handle_message<F: FileSystem, W: DirectoryWalker>(
    pipeline: &mut MirrorPipeline<F, W>,
    message: WatchMessage,
    sink: &dyn EventSink,
) {
    match message {
        WatchMessage::Change { kind, path } => pipeline.ingest(kind, path, Instant::now()),
        WatchMessage::Error(message) => sink.on_event(MirrorEvent::WatcherError { message }),
    }
}
