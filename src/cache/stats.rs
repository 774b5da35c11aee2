//! Cache Statistics Module
//!
//! Tracks cache performance and self-healing metrics.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups served from a valid record
    pub hits: u64,
    /// Lookups that found nothing usable
    pub misses: u64,
    /// Records deleted because their TTL had elapsed
    pub expired: u64,
    /// Records deleted because they could not be decoded
    pub corrupted: u64,
    /// Records deleted by pattern invalidation or clear
    pub invalidated: u64,
    /// Writes abandoned after the store refused them
    pub write_failures: u64,
    /// Current number of entries in the namespace
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }

    pub fn record_corrupted(&mut self, count: usize) {
        self.corrupted += count as u64;
    }

    pub fn record_invalidated(&mut self, count: usize) {
        self.invalidated += count as u64;
    }

    pub fn record_write_failure(&mut self) {
        self.write_failures += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_purge_counters() {
        let mut stats = CacheStats::new();
        stats.record_expired(2);
        stats.record_corrupted(1);
        stats.record_invalidated(3);
        stats.record_write_failure();

        assert_eq!(stats.expired, 2);
        assert_eq!(stats.corrupted, 1);
        assert_eq!(stats.invalidated, 3);
        assert_eq!(stats.write_failures, 1);
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.set_total_entries(4);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["total_entries"], 4);
    }
}
