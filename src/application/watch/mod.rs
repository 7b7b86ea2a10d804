//! Watch Use Case
//!
//! Continuous mirroring of a source tree into a destination tree.
//! It orchestrates:
//! - File system monitoring (via `notify`)
//! - Per-path debouncing (5s quiet period by default)
//! - Per-directory reconciliation (30s window by default)
//! - Serialized transforms through the task scheduler
//!
//! ## Architecture
//!
//! - `WatchUseCase` - Sets up the watcher and runs the control loop
//! - `MirrorPipeline` - Buffers and dispatch, driven by the loop
//! - `WatchOptions` - Roots, timings, batch size
//!
//! ## Usage
//!
//! ```ignore
//! let options = WatchOptions::new("photos", "thumbs");
//! let use_case = WatchUseCase::new(options, transform);
//! use_case.start(running, sink)?;
//! ```

mod options;
mod pipeline;
mod use_case;


pub use options::{WatchOptions, POLL_INTERVAL};
pub use pipeline::MirrorPipeline;
pub use use_case::WatchUseCase;
