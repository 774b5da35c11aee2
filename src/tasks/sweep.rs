//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries. Lazy
//! expiry on read stays in effect whether or not this task runs.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, TtlCache};
use crate::config::CacheConfig;
use crate::store::StorageBackend;

impl<B, C> TtlCache<B, C>
where
    B: StorageBackend + 'static,
    C: Clock + 'static,
{
    /// Starts the sweep task if `config.sweep_interval` is set.
    ///
    /// Returns None when periodic sweeping is disabled.
    pub fn spawn_sweep(self: &Arc<Self>, config: &CacheConfig) -> Option<JoinHandle<()>> {
        config
            .sweep_interval
            .map(|interval| spawn_sweep_task(Arc::clone(self), interval))
    }
}

/// Spawns a background task that calls `sweep_expired` every `interval`.
///
/// # Returns
/// A JoinHandle for the spawned task; abort it on shutdown or sign-out.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(TtlCache::new(backend, &config));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<B, C>(cache: Arc<TtlCache<B, C>>, interval: Duration) -> JoinHandle<()>
where
    B: StorageBackend + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!("Starting cache sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep_expired();

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
