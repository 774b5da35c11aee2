//! Memory Backend Module
//!
//! In-process storage backend with an optional byte quota.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Result, StoreError};
use crate::store::backend::{item_size, StorageBackend};

// == Item Map ==
/// Key/value map that tracks its byte usage against an optional quota.
///
/// Shared by the bundled backends; the file backend persists one of these.
#[derive(Debug, Default)]
pub(crate) struct ItemMap {
    items: HashMap<String, String>,
    used: usize,
    quota: Option<usize>,
}

impl ItemMap {
    pub(crate) fn new(quota: Option<usize>) -> Self {
        Self {
            items: HashMap::new(),
            used: 0,
            quota,
        }
    }

    /// Builds a map from existing items. Items are loaded even if they exceed
    /// the quota; subsequent writes will fail until space is reclaimed.
    pub(crate) fn from_items(items: HashMap<String, String>, quota: Option<usize>) -> Self {
        let used = items.iter().map(|(k, v)| item_size(k, v)).sum();
        Self { items, used, quota }
    }

    pub(crate) fn items(&self) -> &HashMap<String, String> {
        &self.items
    }

    pub(crate) fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    /// Inserts an item, returning the value it replaced.
    pub(crate) fn insert(&mut self, key: &str, value: &str) -> Result<Option<String>> {
        let freed = self
            .items
            .get(key)
            .map(|old| item_size(key, old))
            .unwrap_or(0);
        let needed = item_size(key, value);
        let baseline = self.used - freed;

        if let Some(quota) = self.quota {
            if baseline + needed > quota {
                return Err(StoreError::QuotaExceeded {
                    needed,
                    available: quota.saturating_sub(baseline),
                });
            }
        }

        self.used = baseline + needed;
        Ok(self.items.insert(key.to_string(), value.to_string()))
    }

    /// Puts back an item taken out by a failed operation, ignoring the quota.
    pub(crate) fn restore(&mut self, key: &str, value: String) {
        if let Some(old) = self.items.remove(key) {
            self.used -= item_size(key, &old);
        }
        self.used += item_size(key, &value);
        self.items.insert(key.to_string(), value);
    }

    /// Removes an item, returning its value.
    pub(crate) fn remove(&mut self, key: &str) -> Option<String> {
        let old = self.items.remove(key)?;
        self.used -= item_size(key, &old);
        Some(old)
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    pub(crate) fn used(&self) -> usize {
        self.used
    }
}

// == Memory Backend ==
/// Storage backend that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: Mutex<ItemMap>,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an unbounded backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that rejects writes beyond `quota_bytes`.
    ///
    /// Usage counts the bytes of every key and value held.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(ItemMap::new(Some(quota_bytes))),
        }
    }

    // == Usage ==
    /// Returns the number of bytes currently held.
    pub fn used_bytes(&self) -> usize {
        self.lock().used()
    }

    // == Length ==
    /// Returns the number of items held.
    pub fn len(&self) -> usize {
        self.lock().items().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.lock().items().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, ItemMap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        self.lock().get(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key, value).map(|_| ())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.lock().keys()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_set_and_get() {
        let backend = MemoryBackend::new();

        backend.set_item("key1", "value1").unwrap();

        assert_eq!(backend.get_item("key1").as_deref(), Some("value1"));
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.used_bytes(), "key1".len() + "value1".len());
    }

    #[test]
    fn test_memory_get_missing() {
        let backend = MemoryBackend::new();
        assert!(backend.get_item("missing").is_none());
    }

    #[test]
    fn test_memory_remove_is_idempotent() {
        let backend = MemoryBackend::new();
        backend.set_item("key1", "value1").unwrap();

        backend.remove_item("key1").unwrap();
        backend.remove_item("key1").unwrap();

        assert!(backend.is_empty());
        assert_eq!(backend.used_bytes(), 0);
    }

    #[test]
    fn test_memory_quota_rejects_write() {
        let backend = MemoryBackend::with_quota(10);
        backend.set_item("k", "12345").unwrap(); // 6 bytes

        let result = backend.set_item("k2", "1234");
        assert!(matches!(
            result,
            Err(StoreError::QuotaExceeded {
                needed: 6,
                available: 4
            })
        ));

        // Rejected writes leave the store unchanged
        assert!(backend.get_item("k2").is_none());
        assert_eq!(backend.used_bytes(), 6);
    }

    #[test]
    fn test_memory_quota_counts_overwrite() {
        let backend = MemoryBackend::with_quota(10);
        backend.set_item("k", "123456789").unwrap(); // 10 bytes, full

        // Replacing the value frees the old bytes first
        backend.set_item("k", "abc").unwrap();
        assert_eq!(backend.get_item("k").as_deref(), Some("abc"));
        assert_eq!(backend.used_bytes(), 4);
    }

    #[test]
    fn test_memory_keys() {
        let backend = MemoryBackend::new();
        backend.set_item("a", "1").unwrap();
        backend.set_item("b", "2").unwrap();

        let mut keys = backend.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}
