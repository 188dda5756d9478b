//! Matcher-response cache: LRU + wall-clock max age.
//!
//! Time-based staleness only: the key already hashes the full request
//! payload, so content changes always miss. Age-bounding caps how long an
//! old answer outlives changes in the matcher's own behavior or model
//! version.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::sync::Cache;

use covlens_core::traits::matcher::ScenarioVerdict;

#[derive(Clone)]
struct CachedResponse {
    verdicts: Arc<Vec<ScenarioVerdict>>,
    stored_at: Instant,
}

/// Bounded LRU cache of successful matcher responses.
///
/// Only successful responses are ever inserted, so a failed call can never
/// overwrite a prior cached success. An insert for an existing key replaces
/// it: the most recent successful response wins.
pub struct MatcherCache {
    inner: Cache<u64, CachedResponse>,
    max_age: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MatcherCache {
    /// Create with the given entry capacity and max entry age.
    pub fn new(capacity: u64, max_age: Duration) -> Self {
        let mut builder = Cache::builder().max_capacity(capacity);
        if !max_age.is_zero() {
            builder = builder.time_to_live(max_age);
        }
        Self {
            inner: builder.build(),
            max_age,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a cached response. Entries at or past `max_age` are never
    /// served; the age check here is authoritative even when the store's
    /// own TTL has not yet evicted the entry.
    pub fn get(&self, key: u64) -> Option<Arc<Vec<ScenarioVerdict>>> {
        if let Some(entry) = self.inner.get(&key) {
            if entry.stored_at.elapsed() < self.max_age {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.verdicts.clone());
            }
            self.inner.invalidate(&key);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a successful response, replacing any prior entry for the key.
    pub fn insert(&self, key: u64, verdicts: Vec<ScenarioVerdict>) {
        self.inner.insert(
            key,
            CachedResponse {
                verdicts: Arc::new(verdicts),
                stored_at: Instant::now(),
            },
        );
    }

    pub fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}
