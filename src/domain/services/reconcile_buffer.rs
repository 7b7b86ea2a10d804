//! Reconciliation buffer
//!
//! Defends against the watch primitive under-reporting during bursts
//! (hundreds of files dropped into a folder at once, lossy network or
//! virtualized file systems). Every accepted raw event bumps a counter on a
//! directory; when the counter's window closes the whole directory is
//! re-scanned and every file in it re-recorded as an update.
//!
//! Events coalesce upwards: the ancestor chain of the event's directory is
//! walked from the watch root down and the first directory that already has
//! a check absorbs the hit. A new check is only created at the deepest
//! directory when no ancestor is armed, so the number of live checks is
//! bounded by the shape of the tree, not by event volume.
//!
//! The window is measured from the first hit. Absorbing a hit never moves
//! the deadline, so a directory with a steady trickle of events is still
//! reconciled once per window.

use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use super::expiring_map::ExpiringMap;

/// Window between a directory's first hit and its re-scan.
pub const DEFAULT_RECONCILE: Duration = Duration::from_secs(30);

/// How often the reconciliation buffer looks for expired checks.
pub const DEFAULT_RECONCILE_CHECK: Duration = Duration::from_secs(5);

/// A directory armed for re-scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryCheck {
    pub dir_path: PathBuf,
    pub hit_count: u32,
    pub expires_at: Instant,
}

/// Outcome of [`ReconcileBuffer::observe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// A new check was created at this directory.
    Armed { dir: PathBuf },
    /// An existing check on this ancestor absorbed the event.
    Hit { dir: PathBuf, hit_count: u32 },
    /// The directory is not under the watch root.
    OutsideRoot,
}

#[derive(Debug, Clone)]
pub struct ReconcileBuffer {
    root: PathBuf,
    checks: ExpiringMap<PathBuf, u32>,
}

impl ReconcileBuffer {
    pub fn new(root: impl Into<PathBuf>, window: Duration, check_period: Duration) -> Self {
        Self {
            root: root.into(),
            checks: ExpiringMap::new(window, check_period),
        }
    }

    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self::new(root, DEFAULT_RECONCILE, DEFAULT_RECONCILE_CHECK)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn window(&self) -> Duration {
        self.checks.ttl()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Current check on exactly `dir`, if armed.
    pub fn check(&self, dir: &Path) -> Option<DirectoryCheck> {
        let key = dir.to_path_buf();
        let hit_count = *self.checks.get(&key)?;
        let expires_at = self.checks.expires_at(&key)?;
        Some(DirectoryCheck {
            dir_path: key,
            hit_count,
            expires_at,
        })
    }

    /// Account one raw event whose directory is `event_dir`.
    ///
    /// `event_dir` is the changed path itself when it is a directory,
    /// otherwise its parent; see [`resolve_event_dir`].
    pub fn observe(&mut self, event_dir: &Path, now: Instant) -> Observation {
        let Some(chain) = ancestor_chain(&self.root, event_dir) else {
            return Observation::OutsideRoot;
        };

        for dir in &chain {
            if let Some(hit_count) = self.checks.get_mut(dir) {
                *hit_count = hit_count.saturating_add(1);
                return Observation::Hit {
                    dir: dir.clone(),
                    hit_count: *hit_count,
                };
            }
        }

        // The chain always ends with event_dir itself.
        let deepest = chain
            .last()
            .cloned()
            .unwrap_or_else(|| self.root.clone());
        self.checks.insert(deepest.clone(), 1, now);
        Observation::Armed { dir: deepest }
    }

    /// Periodic sweep; returns the checks whose window has closed.
    pub fn sweep(&mut self, now: Instant) -> Vec<DirectoryCheck> {
        Self::into_checks(self.checks.sweep(now))
    }

    /// Unconditional version of [`ReconcileBuffer::sweep`].
    pub fn drain_expired(&mut self, now: Instant) -> Vec<DirectoryCheck> {
        Self::into_checks(self.checks.drain_expired(now))
    }

    fn into_checks(
        expired: Vec<super::expiring_map::Expired<PathBuf, u32>>,
    ) -> Vec<DirectoryCheck> {
        expired
            .into_iter()
            .map(|e| DirectoryCheck {
                dir_path: e.key,
                hit_count: e.value,
                expires_at: e.expires_at,
            })
            .collect()
    }
}

/// Directory whose check an event on `path` should count against.
pub fn resolve_event_dir(path: &Path, is_dir: bool) -> PathBuf {
    if is_dir {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

/// Prefixes of `dir` from `root` (inclusive) down to `dir` (inclusive).
///
/// `None` when `dir` is not `root` or below it. `.` components are skipped;
/// `..` components make the path ambiguous and are treated as outside.
pub fn ancestor_chain(root: &Path, dir: &Path) -> Option<Vec<PathBuf>> {
    let rel = dir.strip_prefix(root).ok()?;
    let mut chain = vec![root.to_path_buf()];
    let mut current = root.to_path_buf();
    for component in rel.components() {
        match component {
            Component::Normal(part) => {
                current.push(part);
                chain.push(current.clone());
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(chain)
}
