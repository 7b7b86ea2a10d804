//! Domain Layer
//!
//! The coalescing core of treemirror: buffers, value types and the ports the
//! rest of the crate plugs into.
//!
//! ## Structure
//!
//! - `entities/` - Units of work (`ProcessingTask`)
//! - `value_objects/` - Immutable value types (event kinds, metadata, paths, filter)
//! - `services/` - The expiring map and the two buffers built on it
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Buffers take the current `Instant` from the caller
//! 2. **Single owner** - Buffers are plain `&mut self` structures owned by one control loop
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
