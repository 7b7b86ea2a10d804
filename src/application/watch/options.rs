//! Watch options

use std::path::PathBuf;
use std::time::Duration;

use crate::application::scheduler::DEFAULT_BATCH_SIZE;
use crate::config::Config;
use crate::domain::services::{
    DEFAULT_DEBOUNCE, DEFAULT_DEBOUNCE_CHECK, DEFAULT_RECONCILE, DEFAULT_RECONCILE_CHECK,
};

/// How often the control loop wakes up when no notification arrives.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Options for one watch session
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub debounce: Duration,
    pub debounce_check: Duration,
    pub reconcile: Duration,
    pub reconcile_check: Duration,
    pub batch_size: usize,
    pub initial_scan: bool,
    pub poll_interval: Duration,
}

impl WatchOptions {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            debounce: DEFAULT_DEBOUNCE,
            debounce_check: DEFAULT_DEBOUNCE_CHECK,
            reconcile: DEFAULT_RECONCILE,
            reconcile_check: DEFAULT_RECONCILE_CHECK,
            batch_size: DEFAULT_BATCH_SIZE,
            initial_scan: true,
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Take timings, batch size and the initial-scan switch from config.
    pub fn from_config(
        source: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        config: &Config,
    ) -> Self {
        let watch = &config.watch;
        Self {
            debounce: watch.debounce(),
            debounce_check: watch.debounce_check(),
            reconcile: watch.reconcile(),
            reconcile_check: watch.reconcile_check(),
            batch_size: watch.batch_size,
            initial_scan: watch.initial_scan,
            ..Self::new(source, dest)
        }
    }

    pub fn with_initial_scan(mut self, initial_scan: bool) -> Self {
        self.initial_scan = initial_scan;
        self
    }

    pub fn with_debounce(mut self, quiet: Duration, check: Duration) -> Self {
        self.debounce = quiet;
        self.debounce_check = check;
        self
    }

    pub fn with_reconcile(mut self, window: Duration, check: Duration) -> Self {
        self.reconcile = window;
        self.reconcile_check = check;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}
