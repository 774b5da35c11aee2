//! TTL Cache Service Module
//!
//! Owns the lifecycle of cache records: lookup with lazy expiry, timestamped
//! writes with quota recovery, expiry sweeps and pattern invalidation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{CacheRecord, CacheStats, Clock, SystemClock};
use crate::config::CacheConfig;
use crate::store::{StorageBackend, StoreAdapter};

// == TTL Cache ==
/// Response cache with per-record TTL over a persistent store.
///
/// Nothing here returns an error: every storage fault degrades to behaving
/// as if the entry were not cached.
///
/// Each operation holds `stats` for its whole duration, so a read-check-delete
/// or enumerate-delete sequence never interleaves with another operation.
/// No lock is held across an await.
#[derive(Debug)]
pub struct TtlCache<B, C = SystemClock> {
    store: StoreAdapter<B>,
    clock: C,
    default_ttl: Duration,
    stats: Mutex<CacheStats>,
}

impl<B: StorageBackend> TtlCache<B, SystemClock> {
    // == Constructor ==
    /// Creates a cache over `backend` using the wall clock.
    pub fn new(backend: Arc<B>, config: &CacheConfig) -> Self {
        Self::with_clock(backend, config, SystemClock)
    }
}

impl<B: StorageBackend, C: Clock> TtlCache<B, C> {
    /// Creates a cache over `backend` with an explicit time source.
    pub fn with_clock(backend: Arc<B>, config: &CacheConfig, clock: C) -> Self {
        Self {
            store: StoreAdapter::new(backend, config.namespace.clone()),
            clock,
            default_ttl: config.default_ttl,
            stats: Mutex::new(CacheStats::new()),
        }
    }

    /// Returns the underlying store adapter.
    pub fn store(&self) -> &StoreAdapter<B> {
        &self.store
    }

    /// Returns the TTL used by `set` when none is given.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn lock(&self) -> MutexGuard<'_, CacheStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Removes `key`, returning false if the store kept it.
    fn purge(&self, key: &str) -> bool {
        match self.store.remove(key) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to remove cache entry {}: {}", key, e);
                false
            }
        }
    }

    // == Get ==
    /// Returns the cached value for `key` if present and fresh.
    ///
    /// Expired records, and records that can't be decoded as `T`, are deleted
    /// and reported as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut stats = self.lock();

        let Some(raw) = self.store.read(key) else {
            debug!("Cache miss: {}", key);
            stats.record_miss();
            return None;
        };

        let record: CacheRecord<T> = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("Purging corrupt cache record {}: {}", key, e);
                if self.purge(key) {
                    stats.record_corrupted(1);
                }
                stats.record_miss();
                return None;
            }
        };

        if record.is_expired(self.clock.now_ms()) {
            debug!("Cache entry expired: {}", key);
            if self.purge(key) {
                stats.record_expired(1);
            }
            stats.record_miss();
            return None;
        }

        debug!("Cache hit: {}", key);
        stats.record_hit();
        Some(record.data)
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl` (or the default TTL).
    ///
    /// If the store is full, expired entries are swept and the write is
    /// retried once. A write that still fails is dropped silently.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        let mut stats = self.lock();

        let ttl = ttl.unwrap_or(self.default_ttl);
        let record = CacheRecord::new(value, self.clock.now_ms(), ttl);
        let serialized = match serde_json::to_string(&record) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("Not caching {}: value cannot be serialized: {}", key, e);
                stats.record_write_failure();
                return;
            }
        };

        let err = match self.store.write(key, &serialized) {
            Ok(()) => return,
            Err(err) => err,
        };

        if !err.is_quota_exceeded() {
            warn!("Failed to cache {}: {}", key, err);
            stats.record_write_failure();
            return;
        }

        let reclaimed = self.sweep_locked(&mut stats);
        debug!("Store full while caching {}, swept {} expired entries", key, reclaimed);

        if let Err(e) = self.store.write(key, &serialized) {
            warn!("Failed to cache {} after sweeping: {}", key, e);
            stats.record_write_failure();
        }
    }

    // == Sweep Expired ==
    /// Removes every expired or undecodable record in the namespace.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let mut stats = self.lock();
        self.sweep_locked(&mut stats)
    }

    fn sweep_locked(&self, stats: &mut CacheStats) -> usize {
        let now = self.clock.now_ms();
        let mut expired = 0;
        let mut corrupted = 0;

        for key in self.store.keys() {
            let Some(raw) = self.store.read(&key) else {
                continue;
            };

            match serde_json::from_str::<CacheRecord<IgnoredAny>>(&raw) {
                Ok(record) if record.is_expired(now) => {
                    if self.purge(&key) {
                        expired += 1;
                    }
                }
                Ok(_) => {}
                Err(_) => {
                    if self.purge(&key) {
                        corrupted += 1;
                    }
                }
            }
        }

        stats.record_expired(expired);
        stats.record_corrupted(corrupted);
        expired + corrupted
    }

    // == Invalidate ==
    /// Removes every entry whose key contains `pattern`.
    ///
    /// Matching is plain substring containment on the logical key, so
    /// `"bills"` removes `bills_all_{}` and `bills_detail_5` alike. An empty
    /// pattern matches everything. Returns the number of entries removed.
    pub fn invalidate(&self, pattern: &str) -> usize {
        let mut stats = self.lock();

        let removed = self
            .store
            .keys()
            .into_iter()
            .filter(|key| key.contains(pattern))
            .filter(|key| self.purge(key))
            .count();

        debug!("Invalidated {} entries matching {:?}", removed, pattern);
        stats.record_invalidated(removed);
        removed
    }

    // == Clear All ==
    /// Removes every entry in the namespace, leaving other data untouched.
    ///
    /// Call on sign-out so no cached data crosses a session boundary. Returns
    /// the number of entries removed; entries the store failed to remove are
    /// logged and left in place, so `store().keys()` shows what survived.
    pub fn clear_all(&self) -> usize {
        let mut stats = self.lock();

        let keys = self.store.keys();
        let removed = keys.iter().filter(|key| self.purge(key)).count();

        if removed < keys.len() {
            warn!(
                "Cleared {} of {} cache entries, {} could not be removed",
                removed,
                keys.len(),
                keys.len() - removed
            );
        } else {
            info!("Cleared {} cache entries", removed);
        }
        stats.record_invalidated(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.lock().clone();
        stats.set_total_entries(self.store.keys().len());
        stats
    }
}
