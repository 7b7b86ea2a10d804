//! Expiring map
//!
//! Key/value map where every entry carries its own deadline. Expired entries
//! are not removed on their own: the owner calls [`ExpiringMap::sweep`] on
//! its loop, and the sweep only scans once per check period.
//!
//! Time is always passed in by the caller so the map stays free of clocks
//! and can be tested with synthetic instants.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Longest TTL or check period the map honours; longer values are clamped.
pub const MAX_PERIOD: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// An entry removed by a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expired<K, V> {
    pub key: K,
    pub value: V,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct ExpiringMap<K, V> {
    entries: HashMap<K, Entry<V>>,
    ttl: Duration,
    check_period: Duration,
    next_check: Option<Instant>,
}

impl<K, V> ExpiringMap<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(ttl: Duration, check_period: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl: ttl.min(MAX_PERIOD),
            check_period: check_period.min(MAX_PERIOD),
            next_check: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn check_period(&self) -> Duration {
        self.check_period
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Upsert `key`, restarting its deadline at `now + ttl`.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: K, value: V, now: Instant) -> Option<V> {
        let entry = Entry {
            value,
            expires_at: later(now, self.ttl),
        };
        self.entries.insert(key, entry).map(|old| old.value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|e| &e.value)
    }

    /// Mutable access that leaves the deadline alone.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key).map(|e| &mut e.value)
    }

    pub fn expires_at(&self, key: &K) -> Option<Instant> {
        self.entries.get(key).map(|e| e.expires_at)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|e| e.value)
    }

    /// Whether a periodic sweep is due at `now`.
    pub fn sweep_due(&self, now: Instant) -> bool {
        self.next_check.map_or(true, |next| now >= next)
    }

    /// Periodic sweep: a no-op until the check period has elapsed since the
    /// previous one, then the same as [`ExpiringMap::drain_expired`].
    pub fn sweep(&mut self, now: Instant) -> Vec<Expired<K, V>> {
        if !self.sweep_due(now) {
            return Vec::new();
        }
        self.next_check = Some(later(now, self.check_period));
        self.drain_expired(now)
    }

    /// Remove and return every entry whose deadline is at or before `now`,
    /// earliest deadline first.
    pub fn drain_expired(&mut self, now: Instant) -> Vec<Expired<K, V>> {
        let keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, e)| e.expires_at <= now)
            .map(|(k, _)| k.clone())
            .collect();

        let mut expired: Vec<Expired<K, V>> = keys
            .into_iter()
            .filter_map(|key| {
                self.entries.remove(&key).map(|e| Expired {
                    key,
                    value: e.value,
                    expires_at: e.expires_at,
                })
            })
            .collect();
        expired.sort_by_key(|e| e.expires_at);
        expired
    }
}

// `now + period`, saturating at `now + MAX_PERIOD` and then at `now`.
fn later(now: Instant, period: Duration) -> Instant {
    now.checked_add(period)
        .or_else(|| now.checked_add(MAX_PERIOD))
        .unwrap_or(now)
}
