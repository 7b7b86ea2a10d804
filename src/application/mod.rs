//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `WatchUseCase` - Continuous mirroring driven by file system events
//! - `CompressUseCase` - One-shot batch pass over the source tree
//!
//! ## Services
//!
//! - `Dispatcher` - Turns an expired event into a task, a delete, or a skip
//! - `TaskScheduler` - Single-consumer batch queue
//! - `TransformHandler` - Runs the transform for each scheduled task

pub mod compress;
pub mod dispatch;
pub mod processor;
pub mod roots;
pub mod scheduler;
pub mod watch;

pub use compress::{CompressOptions, CompressSummary, CompressUseCase};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use processor::TransformHandler;
pub use roots::resolve_roots;
pub use scheduler::{BatchHandler, TaskScheduler, DEFAULT_BATCH_SIZE};
pub use watch::{MirrorPipeline, WatchOptions, WatchUseCase};
