//! Storage Backend Module
//!
//! Defines the contract of the synchronous key/value store the cache persists into.

use crate::error::Result;

// == Storage Backend ==
/// A synchronous string-keyed store with finite capacity.
///
/// Implementations serialize their own operations, so a shared reference is
/// enough to mutate them.
pub trait StorageBackend: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Fails with `StoreError::QuotaExceeded` when the store is full.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is a no-op.
    ///
    /// Fails if the removal could not be made durable; the item is then
    /// still present.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Returns every key currently held, in no particular order.
    fn keys(&self) -> Vec<String>;
}

/// Bytes an item occupies against a quota.
pub(crate) fn item_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}
