//! Cache Record Module
//!
//! Defines the unit of storage: a payload stamped with its write time and TTL.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// == Cache Record ==
/// A cached payload with the metadata needed to judge its freshness.
///
/// Serialized as `{"data": .., "timestamp": .., "ttl": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord<T> {
    /// The cached payload
    pub data: T,
    /// Write timestamp (Unix milliseconds)
    #[serde(rename = "timestamp")]
    pub stored_at: i64,
    /// Lifetime in milliseconds, fixed at write time
    #[serde(rename = "ttl")]
    pub ttl_ms: u64,
}

impl<T> CacheRecord<T> {
    // == Constructor ==
    /// Creates a record written at `stored_at` that lives for `ttl`.
    pub fn new(data: T, stored_at: i64, ttl: Duration) -> Self {
        Self {
            data,
            stored_at,
            ttl_ms: duration_to_ms(ttl),
        }
    }

    /// Milliseconds elapsed since the write. Negative if the clock went back.
    pub fn age_ms(&self, now: i64) -> i64 {
        now.saturating_sub(self.stored_at)
    }

    // == Is Expired ==
    /// Checks if the record is stale at `now`.
    ///
    /// A record is still valid while `now - stored_at <= ttl`; it expires
    /// strictly after the TTL has elapsed.
    pub fn is_expired(&self, now: i64) -> bool {
        i128::from(self.age_ms(now)) > i128::from(self.ttl_ms)
    }
}

/// Converts a TTL to whole milliseconds, saturating on overflow.
pub(crate) fn duration_to_ms(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)
}
