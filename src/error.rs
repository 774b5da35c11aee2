//! Error types for the response cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Errors raised by the persistence layer.
///
/// None of these ever reach callers of the cache service; they are absorbed
/// there and degrade to "not cached".
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend refused the write because its quota is exhausted
    #[error("Storage quota exceeded: needed {needed} bytes, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    /// The backend could not persist its contents
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns true if this error signals an exhausted quota.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded { .. })
    }
}

// == Result Type Alias ==
/// Convenience Result type for the persistence layer.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_exceeded_is_distinct() {
        let quota = StoreError::QuotaExceeded {
            needed: 10,
            available: 4,
        };
        let io = StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));

        assert!(quota.is_quota_exceeded());
        assert!(!io.is_quota_exceeded());
        assert!(quota.to_string().contains("needed 10 bytes"));
    }
}
