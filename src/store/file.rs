//! File Backend Module
//!
//! Storage backend that persists all items as one JSON object on disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::memory::ItemMap;

// == File Backend ==
/// Storage backend backed by a single JSON file.
///
/// The whole map is loaded on open and rewritten after every mutation, so the
/// file always reflects the last successful operation.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    inner: Mutex<ItemMap>,
}

impl FileBackend {
    // == Constructor ==
    /// Opens (or creates on first write) the store at `path` with a byte quota.
    ///
    /// A missing file opens empty. A file that can't be read or parsed also
    /// opens empty, and is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>, quota_bytes: usize) -> Self {
        let path = path.into();
        let items = load_items(&path);

        Self {
            path,
            inner: Mutex::new(ItemMap::from_items(items, Some(quota_bytes))),
        }
    }

    /// Opens the store at `path` with the quota from `config`.
    pub fn from_config(path: impl Into<PathBuf>, config: &CacheConfig) -> Self {
        Self::open(path, config.quota_bytes)
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Persist ==
    /// Writes the map to a sibling temp file, then renames it into place.
    fn persist(&self, map: &ItemMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string(map.items())?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ItemMap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load_items(path: &Path) -> HashMap<String, String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(e) => {
            warn!("Cannot read cache store {}: {}", path.display(), e);
            return HashMap::new();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!("Discarding unparsable cache store {}: {}", path.display(), e);
        HashMap::new()
    })
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        self.lock().get(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.lock();
        let previous = map.insert(key, value)?;

        if let Err(e) = self.persist(&map) {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => map.restore(key, old),
                None => {
                    map.remove(key);
                }
            }
            return Err(e);
        }

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut map = self.lock();
        let Some(old) = map.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist(&map) {
            // The item is still on disk, so keep it in memory too
            map.restore(key, old);
            return Err(e);
        }

        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.lock().keys()
    }
}
