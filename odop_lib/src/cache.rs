//! In-memory TTL cache for API responses.

use dashmap::DashMap;
use std::time::{Duration, Instant};

struct Entry {
    payload: String,
    expires_at: Instant,
}

/// Thread-safe response cache with time-to-live expiry, backed by
/// `DashMap`. Values are serialized JSON keyed by the request they
/// answer. Expired entries are evicted lazily on lookup.
pub struct TtlCache {
    entries: DashMap<String, Entry>,
    ttl: Duration,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached payload for `key` if present and not expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let entry = self.entries.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.entries.remove(key);
            return None;
        }
        Some(entry.payload.clone())
    }

    /// Stores a payload under `key`, replacing any previous value. The
    /// entry lives for the cache's configured TTL.
    pub fn put(&self, key: String, payload: String) {
        self.entries.insert(
            key,
            Entry {
                payload,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
