//! Transform handler
//!
//! The scheduler's batch handler: runs the transform for every task in the
//! batch, reports each success or failure on its own, and never asks for
//! re-delivery. A failing file does not affect its siblings.

use std::sync::Arc;

use super::scheduler::BatchHandler;
use crate::domain::entities::ProcessingTask;
use crate::domain::ports::{EventSink, MirrorEvent, Transform};

#[derive(Clone)]
pub struct TransformHandler {
    transform: Arc<dyn Transform>,
    sink: Arc<dyn EventSink>,
}

impl TransformHandler {
    pub fn new(transform: Arc<dyn Transform>, sink: Arc<dyn EventSink>) -> Self {
        Self { transform, sink }
    }

    /// Run one task; `true` when the transform succeeded.
    pub fn run_task(&self, task: &ProcessingTask) -> bool {
        let source = task.source_path.display().to_string();
        let dest = task.dest_path.display().to_string();

        match self.transform.transform(&task.source_path, task.dest_dir()) {
            Ok(output) => {
                self.sink.on_event(MirrorEvent::Processed {
                    source,
                    dest,
                    source_bytes: task.source_stat.size,
                    output_bytes: output.bytes,
                });
                true
            }
            Err(e) => {
                self.sink.on_event(MirrorEvent::TransformFailed {
                    source,
                    dest,
                    size: task.source_stat.size,
                    message: e.to_string(),
                });
                false
            }
        }
    }
}

impl BatchHandler<ProcessingTask> for TransformHandler {
    fn process(&self, batch: Vec<ProcessingTask>) -> Vec<ProcessingTask> {
        for task in &batch {
            self.run_task(task);
        }
        Vec::new()
    }
}
