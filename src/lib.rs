//! API Cache - a client-side response cache for remote data APIs
//!
//! Provides TTL-bounded caching over a persistent key/value store, substring
//! pattern invalidation after mutations, and cache-aside wrapping of async
//! fetch functions.

pub mod cache;
pub mod config;
pub mod error;
pub mod memo;
pub mod prefetch;
pub mod store;
pub mod tasks;

pub use cache::{cache_key, resource_key, CacheStats, TtlCache};
pub use config::CacheConfig;
pub use error::{Result, StoreError};
pub use memo::Memoized;
pub use prefetch::{Prefetch, PrefetchReport};
pub use store::{FileBackend, MemoryBackend, StorageBackend, StoreAdapter};
pub use tasks::spawn_sweep_task;
