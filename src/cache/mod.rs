//! Cache Module
//!
//! TTL-bounded response caching over a persistent store.

mod clock;
mod key;
mod record;
mod service;
mod stats;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use key::{cache_key, resource_key};
pub use record::CacheRecord;
pub use service::TtlCache;
pub use stats::CacheStats;
