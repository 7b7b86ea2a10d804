//! File watching on top of `notify`

mod notify_adapter;

pub use notify_adapter::{classify, NotifyWatchAdapter, WatchMessage};
