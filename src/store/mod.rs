//! Store Module
//!
//! Persistence backends and the namespacing adapter the cache service talks to.

mod adapter;
mod backend;
mod file;
mod memory;

// Re-export public types
pub use adapter::StoreAdapter;
pub use backend::StorageBackend;
pub use file::FileBackend;
pub use memory::MemoryBackend;
