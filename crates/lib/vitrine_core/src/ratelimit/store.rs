//! Attempt-count storage behind a pluggable interface.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// One key's attempt count within its current window.
#[derive(Debug, Clone)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: Instant,
    /// Window length, kept on the entry so sweeps can judge expiry.
    pub window: Duration,
}

impl RateLimitEntry {
    /// Whether the entry's window has passed as of `now`.
    pub fn expired(&self, now: Instant) -> bool {
        now.duration_since(self.window_start) > self.window
    }
}

/// Storage for rate-limit entries.
///
/// The default [`MemoryStore`] is process-local. Tests instantiate their
/// own stores, and a distributed backing store can be substituted without
/// changing call sites.
pub trait RateLimitStore: Send + Sync {
    fn get(&self, key: &str) -> Option<RateLimitEntry>;
    fn set(&self, key: &str, entry: RateLimitEntry);
    fn remove(&self, key: &str);
    /// Drop every entry whose window has passed as of `now`.
    fn sweep_expired(&self, now: Instant);
}

/// In-memory store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, RateLimitEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries (expired ones included until swept).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RateLimitStore for MemoryStore {
    fn get(&self, key: &str) -> Option<RateLimitEntry> {
        self.entries.get(key).map(|e| e.value().clone())
    }

    fn set(&self, key: &str, entry: RateLimitEntry) {
        self.entries.insert(key.to_string(), entry);
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    fn sweep_expired(&self, now: Instant) {
        self.entries.retain(|_, entry| !entry.expired(now));
    }
}
