//! Domain Services
//!
//! Event-coalescing state. These services hold no clocks and do no I/O;
//! the watch pipeline owns them and feeds them the current instant.

mod debounce_buffer;
mod expiring_map;
mod reconcile_buffer;

pub use debounce_buffer::{DebounceBuffer, DEFAULT_DEBOUNCE, DEFAULT_DEBOUNCE_CHECK};
pub use expiring_map::{Expired, ExpiringMap};
pub use reconcile_buffer::{
    ancestor_chain, resolve_event_dir, DirectoryCheck, Observation, ReconcileBuffer,
    DEFAULT_RECONCILE, DEFAULT_RECONCILE_CHECK,
};
