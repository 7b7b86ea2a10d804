//! Domain Entities
//!
//! - `ProcessingTask` - One transform invocation waiting in the scheduler

mod processing_task;

pub use processing_task::ProcessingTask;
