//! Debounce buffer
//!
//! Coalesces repeated notifications on the same path into one pending
//! action. Every `record` restarts the path's quiet period and overwrites its
//! kind, so a path fires exactly once, with its last kind, after it has been
//! quiet for the whole window.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::expiring_map::ExpiringMap;
use crate::domain::value_objects::{FileEventKind, PendingFileEvent};

/// Quiet period before a path's pending event fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(5);

/// How often the debounce buffer looks for expired entries.
pub const DEFAULT_DEBOUNCE_CHECK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct DebounceBuffer {
    pending: ExpiringMap<PathBuf, FileEventKind>,
}

impl Default for DebounceBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE, DEFAULT_DEBOUNCE_CHECK)
    }
}

impl DebounceBuffer {
    pub fn new(quiet_period: Duration, check_period: Duration) -> Self {
        Self {
            pending: ExpiringMap::new(quiet_period, check_period),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.pending.ttl()
    }

    /// Upsert the pending event for `path` (last write wins, timer restarts).
    pub fn record(&mut self, path: PathBuf, kind: FileEventKind, now: Instant) {
        self.pending.insert(path, kind, now);
    }

    pub fn pending_kind(&self, path: &Path) -> Option<FileEventKind> {
        self.pending.get(&path.to_path_buf()).copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Periodic sweep; returns the events whose quiet period has elapsed.
    pub fn sweep(&mut self, now: Instant) -> Vec<PendingFileEvent> {
        Self::into_events(self.pending.sweep(now))
    }

    /// Unconditional version of [`DebounceBuffer::sweep`].
    pub fn drain_expired(&mut self, now: Instant) -> Vec<PendingFileEvent> {
        Self::into_events(self.pending.drain_expired(now))
    }

    fn into_events(
        expired: Vec<super::expiring_map::Expired<PathBuf, FileEventKind>>,
    ) -> Vec<PendingFileEvent> {
        expired
            .into_iter()
            .map(|e| PendingFileEvent {
                path: e.key,
                kind: e.value,
                expires_at: e.expires_at,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn rapid_updates_coalesce_into_one_event() {
        let t0 = Instant::now();
        let mut buffer = DebounceBuffer::default();
        let path = PathBuf::from("/a/b.png");

        buffer.record(path.clone(), FileEventKind::Update, t0);
        buffer.record(path.clone(), FileEventKind::Update, t0 + secs(0.5));
        buffer.record(path.clone(), FileEventKind::Update, t0 + secs(1.0));

        // Five units after the *last* record, not the first.
        assert!(buffer.drain_expired(t0 + secs(5.5)).is_empty());
        let fired = buffer.drain_expired(t0 + secs(6.0));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].path, path);
        assert_eq!(fired[0].kind, FileEventKind::Update);
        assert_eq!(fired[0].expires_at, t0 + secs(6.0));

        assert!(buffer.drain_expired(t0 + secs(60.0)).is_empty());
    }

    #[test]
    fn last_kind_wins() {
        let t0 = Instant::now();
        let mut buffer = DebounceBuffer::default();
        let path = PathBuf::from("/a/b.png");

        buffer.record(path.clone(), FileEventKind::Update, t0);
        buffer.record(path.clone(), FileEventKind::Remove, t0 + secs(1.0));
        assert_eq!(buffer.pending_kind(&path), Some(FileEventKind::Remove));

        let fired = buffer.drain_expired(t0 + secs(10.0));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, FileEventKind::Remove);
    }

    #[test]
    fn paths_expire_independently() {
        let t0 = Instant::now();
        let mut buffer = DebounceBuffer::default();

        buffer.record(PathBuf::from("/a/1.png"), FileEventKind::Update, t0);
        buffer.record(
            PathBuf::from("/a/2.png"),
            FileEventKind::Update,
            t0 + secs(3.0),
        );

        let first = buffer.drain_expired(t0 + secs(5.0));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].path, PathBuf::from("/a/1.png"));
        assert_eq!(buffer.len(), 1);

        let second = buffer.drain_expired(t0 + secs(8.0));
        assert_eq!(second[0].path, PathBuf::from("/a/2.png"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn sweep_waits_for_check_period() {
        let t0 = Instant::now();
        let mut buffer = DebounceBuffer::new(secs(0.1), secs(1.0));
        buffer.record(PathBuf::from("/a/b.png"), FileEventKind::Update, t0);

        assert!(buffer.sweep(t0).is_empty());
        assert!(buffer.sweep(t0 + secs(0.5)).is_empty());
        assert_eq!(buffer.sweep(t0 + secs(1.0)).len(), 1);
    }

    #[test]
    fn huge_quiet_period_does_not_overflow() {
        let t0 = Instant::now();
        let mut buffer = DebounceBuffer::new(secs(1e19), secs(1e19));
        buffer.record(PathBuf::from("/a/b.png"), FileEventKind::Update, t0);

        assert!(buffer.sweep(t0).is_empty());
        assert_eq!(
            buffer.pending_kind(Path::new("/a/b.png")),
            Some(FileEventKind::Update)
        );
    }
}
