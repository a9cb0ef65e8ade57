use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Thread-safe response cache with a fixed TTL per entry.
pub struct TtlCache<V> {
    entries: DashMap<String, Entry<V>>,
    ttl: Duration,
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Fresh value for `key`, dropping it if expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if entry.expires_at > Instant::now() {
            return Some(entry.value.clone());
        }
        drop(entry);
        self.entries.remove(key);
        None
    }

    /// Store `value` under `key`. A zero TTL disables caching.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(
            key.into(),
            Entry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }
}
