//! Memoizing Call Wrapper
//!
//! Turns an async fetch function into a cache-aside call: derive a key from
//! the arguments, serve from the cache when fresh, otherwise fetch and store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{Clock, TtlCache};
use crate::store::StorageBackend;

// == Memoized ==
/// An async fetch function wrapped with cache-aside behavior.
///
/// Arguments are passed as one value; use a tuple for several. Concurrent
/// misses for the same key are not coalesced: each one calls `fetch`.
pub struct Memoized<B, C, F, K> {
    cache: Arc<TtlCache<B, C>>,
    fetch: F,
    key_fn: K,
    ttl: Option<Duration>,
}

impl<B, C, F, K> Memoized<B, C, F, K>
where
    B: StorageBackend,
    C: Clock,
{
    // == Constructor ==
    /// Wraps `fetch`, keying calls with `key_fn` and caching results for `ttl`
    /// (None = the cache's default TTL).
    ///
    /// `key_fn` must be pure: equal arguments must give equal keys.
    pub fn new(cache: Arc<TtlCache<B, C>>, fetch: F, key_fn: K, ttl: Option<Duration>) -> Self {
        Self {
            cache,
            fetch,
            key_fn,
            ttl,
        }
    }

    /// Returns the cache this wrapper reads and writes.
    pub fn cache(&self) -> &Arc<TtlCache<B, C>> {
        &self.cache
    }

    // == Call ==
    /// Returns the cached result for `args`, or fetches and caches it.
    ///
    /// A fetch error is returned unchanged and nothing is cached, so the next
    /// call tries the fetch again.
    pub async fn call<A, T, E, Fut>(&self, args: A) -> Result<T, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        K: Fn(&A) -> String,
        T: Serialize + DeserializeOwned,
    {
        let key = (self.key_fn)(&args);

        if let Some(cached) = self.cache.get::<T>(&key) {
            return Ok(cached);
        }

        let result = (self.fetch)(args).await?;
        self.cache.set(&key, &result, self.ttl);
        Ok(result)
    }
}

impl<B: StorageBackend, C: Clock> TtlCache<B, C> {
    // == Wrap ==
    /// Wraps `fetch` in a [`Memoized`] call backed by this cache.
    pub fn wrap<F, K>(
        self: &Arc<Self>,
        fetch: F,
        key_fn: K,
        ttl: Option<Duration>,
    ) -> Memoized<B, C, F, K> {
        Memoized::new(Arc::clone(self), fetch, key_fn, ttl)
    }
}
