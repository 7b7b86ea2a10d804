//! Task scheduler
//!
//! A FIFO queue drained by at most one worker loop at a time. `push` never
//! blocks: it appends to the queue and, if no loop is active, spawns one.
//! The loop takes up to `batch_size` items from the head, hands them to the
//! handler, puts any leftovers back at the head, and exits once it finds
//! the queue empty. The next `push` starts a new loop.
//!
//! The handler therefore never runs concurrently with itself, which caps the
//! number of simultaneous transforms at one no matter how large a burst is.
//!
//! Handlers are expected to deal with per-item failures themselves and
//! return an empty leftover list. A panicking handler loses its batch (the
//! panic is reported to the event sink) but does not stop the loop.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::ports::{EventSink, MirrorEvent};

/// Default number of items handed to the handler per call.
pub const DEFAULT_BATCH_SIZE: usize = 1;

/// Processes one batch and returns the items to re-deliver first.
pub trait BatchHandler<T>: Send + Sync + 'static {
    fn process(&self, batch: Vec<T>) -> Vec<T>;
}

impl<T, F> BatchHandler<T> for F
where
    F: Fn(Vec<T>) -> Vec<T> + Send + Sync + 'static,
{
    fn process(&self, batch: Vec<T>) -> Vec<T> {
        self(batch)
    }
}

#[derive(Debug)]
struct QueueState<T> {
    queue: VecDeque<T>,
    running: bool,
}

struct Shared<T> {
    state: Mutex<QueueState<T>>,
    idle: Condvar,
    handler: Box<dyn BatchHandler<T>>,
    batch_size: usize,
    sink: Arc<dyn EventSink>,
}

/// Single-consumer batch runner. Cloning yields another handle to the same
/// queue.
pub struct TaskScheduler<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for TaskScheduler<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: 'static> std::fmt::Debug for TaskScheduler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("TaskScheduler")
            .field("queued", &state.queue.len())
            .field("running", &state.running)
            .field("batch_size", &self.shared.batch_size)
            .finish()
    }
}

impl<T: Send + 'static> TaskScheduler<T> {
    /// Scheduler with the default batch size of one.
    pub fn new(handler: impl BatchHandler<T>, sink: Arc<dyn EventSink>) -> Self {
        Self::with_batch_size(handler, DEFAULT_BATCH_SIZE, sink)
    }

    /// `batch_size` of zero is treated as one.
    pub fn with_batch_size(
        handler: impl BatchHandler<T>,
        batch_size: usize,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(QueueState {
                    queue: VecDeque::new(),
                    running: false,
                }),
                idle: Condvar::new(),
                handler: Box::new(handler),
                batch_size: batch_size.max(1),
                sink,
            }),
        }
    }

    /// Append `task` to the tail and make sure a run loop is active.
    pub fn push(&self, task: T) {
        let start = {
            let mut state = self.shared.lock();
            state.queue.push_back(task);
            !std::mem::replace(&mut state.running, true)
        };
        if start {
            self.spawn_loop();
        }
    }

    pub fn len(&self) -> usize {
        self.shared.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().running
    }

    /// Block until the queue is empty and no loop is active.
    pub fn wait_idle(&self) {
        let mut state = self.shared.lock();
        while state.running || !state.queue.is_empty() {
            state = self
                .shared
                .idle
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Like [`TaskScheduler::wait_idle`] with an upper bound; returns whether
    /// the scheduler went idle in time.
    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.lock();
        while state.running || !state.queue.is_empty() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            state = self
                .shared
                .idle
                .wait_timeout(state, deadline - now)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|e| e.into_inner().0);
        }
        true
    }

    fn spawn_loop(&self) {
        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("treemirror-scheduler".to_string())
            .spawn(move || shared.run());

        if let Err(e) = spawned {
            // Queue is left intact for the next push.
            self.shared.lock().running = false;
            self.shared.idle.notify_all();
            self.shared.sink.on_event(MirrorEvent::Error {
                message: format!("failed to start scheduler thread: {e}"),
            });
        }
    }
}

impl<T: 'static> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn run(&self) {
        loop {
            let batch: Vec<T> = {
                let mut state = self.lock();
                if state.queue.is_empty() {
                    state.running = false;
                    self.idle.notify_all();
                    return;
                }
                let take = self.batch_size.min(state.queue.len());
                state.queue.drain(..take).collect()
            };

            let size = batch.len();
            match panic::catch_unwind(AssertUnwindSafe(|| self.handler.process(batch))) {
                Ok(leftover) if !leftover.is_empty() => {
                    let mut state = self.lock();
                    for item in leftover.into_iter().rev() {
                        state.queue.push_front(item);
                    }
                }
                Ok(_) => {}
                Err(payload) => {
                    self.sink.on_event(MirrorEvent::HandlerPanicked {
                        dropped: size,
                        message: panic_message(payload.as_ref()),
                    });
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
