//! Store Adapter Module
//!
//! The only component that touches the raw persistence backend. Confines the
//! cache to its reserved namespace prefix.

use std::sync::Arc;

use crate::error::Result;
use crate::store::StorageBackend;

// == Store Adapter ==
/// Namespacing wrapper over a shared storage backend.
///
/// Callers pass logical keys; the adapter stores them as `namespace + key`
/// and only ever enumerates keys inside its namespace.
#[derive(Debug)]
pub struct StoreAdapter<B> {
    backend: Arc<B>,
    namespace: String,
}

impl<B: StorageBackend> StoreAdapter<B> {
    // == Constructor ==
    /// Creates an adapter over `backend` reserving the `namespace` prefix.
    pub fn new(backend: Arc<B>, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
        }
    }

    /// Returns the reserved prefix.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the shared backend, for data that lives outside the namespace.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    // == Read ==
    /// Returns the serialized record stored under `key`, or None.
    pub fn read(&self, key: &str) -> Option<String> {
        self.backend.get_item(&self.storage_key(key))
    }

    // == Write ==
    /// Stores a serialized record under `key`.
    ///
    /// A full backend is reported as `StoreError::QuotaExceeded`.
    pub fn write(&self, key: &str, serialized: &str) -> Result<()> {
        self.backend.set_item(&self.storage_key(key), serialized)
    }

    // == Remove ==
    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// Fails if the backend could not make the removal durable.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove_item(&self.storage_key(key))
    }

    // == Keys ==
    /// Returns the logical keys of every entry inside the namespace.
    pub fn keys(&self) -> Vec<String> {
        self.backend
            .keys()
            .into_iter()
            .filter_map(|k| k.strip_prefix(&self.namespace).map(str::to_string))
            .collect()
    }
}
