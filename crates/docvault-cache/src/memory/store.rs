//! Flat key -> (value, timestamp) map with lazy expiry.
//!
//! Reads share an `RwLock` read guard. Writes, invalidations, and lazy
//! evictions take the write guard only for the map mutation itself; no
//! I/O happens while any guard is held.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use docvault_core::config::cache::DEFAULT_LIFESPAN;

#[derive(Debug)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Generic TTL cache keyed by strings.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    lifespan: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache whose entries live for `lifespan`.
    ///
    /// A zero lifespan means "unset" and falls back to 15 seconds.
    pub fn new(lifespan: Duration) -> Self {
        let lifespan = if lifespan.is_zero() {
            DEFAULT_LIFESPAN
        } else {
            lifespan
        };
        Self {
            entries: RwLock::new(HashMap::new()),
            lifespan,
        }
    }

    /// Configured entry lifespan.
    pub fn lifespan(&self) -> Duration {
        self.lifespan
    }

    /// Store `value` under `key`, replacing any previous entry and its age.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let entry = Entry {
            value,
            stored_at: Instant::now(),
        };
        self.write().insert(key.into(), entry);
    }

    /// Look up `key`. Expired entries are reported absent and removed.
    pub fn get(&self, key: &str) -> Option<V> {
        {
            let entries = self.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !self.is_expired(entry) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // A concurrent set may have refreshed the entry between the guards.
        let mut entries = self.write();
        if entries.get(key).is_some_and(|e| self.is_expired(e)) {
            entries.remove(key);
            debug!(key = %key, "Evicted expired cache entry");
        }
        None
    }

    /// Remove every key containing `pattern`. Returns the number removed.
    pub fn invalidate(&self, pattern: &str) -> usize {
        let doomed: Vec<String> = self
            .read()
            .keys()
            .filter(|k| k.contains(pattern))
            .cloned()
            .collect();
        if doomed.is_empty() {
            return 0;
        }

        let mut entries = self.write();
        let removed = doomed
            .iter()
            .filter(|k| entries.remove(k.as_str()).is_some())
            .count();
        debug!(pattern = %pattern, removed, "Invalidated cache entries");
        removed
    }

    /// Drop every expired entry. Returns the number removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, e| e.stored_at.elapsed() < self.lifespan);
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn is_expired(&self, entry: &Entry<V>) -> bool {
        entry.stored_at.elapsed() >= self.lifespan
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_LIFESPAN)
    }
}
