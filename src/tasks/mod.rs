//! Background Tasks Module
//!
//! Optional maintenance tasks a host can run alongside the cache.
//!
//! # Tasks
//! - Expiry sweep: periodically removes expired cache entries

mod sweep;

pub use sweep::spawn_sweep_task;
