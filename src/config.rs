//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Namespace prefix reserved for cache entries in the shared store.
pub const DEFAULT_NAMESPACE: &str = "api_cache_";

/// Default TTL applied when a write does not specify one (5 minutes).
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Default storage quota in bytes (5 MiB).
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Prefix under which cache keys live in the underlying store
    pub namespace: String,
    /// TTL for writes that don't specify one
    pub default_ttl: Duration,
    /// Byte quota for the bundled backends
    pub quota_bytes: usize,
    /// Interval of the optional sweep task, None = disabled
    pub sweep_interval: Option<Duration>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_CACHE_NAMESPACE` - Key prefix (default: `api_cache_`)
    /// - `API_CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `API_CACHE_QUOTA_BYTES` - Storage quota in bytes (default: 5 MiB)
    /// - `API_CACHE_SWEEP_INTERVAL_SECS` - Sweep task interval, 0 disables it (default: 0)
    pub fn from_env() -> Self {
        Self {
            namespace: env::var("API_CACHE_NAMESPACE")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            default_ttl: Duration::from_millis(
                env::var("API_CACHE_DEFAULT_TTL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TTL_MS),
            ),
            quota_bytes: env::var("API_CACHE_QUOTA_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_QUOTA_BYTES),
            sweep_interval: env::var("API_CACHE_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_ttl: Duration::from_millis(DEFAULT_TTL_MS),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            sweep_interval: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.namespace, "api_cache_");
        assert_eq!(config.default_ttl, Duration::from_secs(300));
        assert_eq!(config.quota_bytes, 5 * 1024 * 1024);
        assert!(config.sweep_interval.is_none());
    }

    #[test]
    fn test_config_from_env() {
        // Single test touches the env so parallel tests don't race on it
        env::remove_var("API_CACHE_NAMESPACE");
        env::remove_var("API_CACHE_DEFAULT_TTL_MS");
        env::remove_var("API_CACHE_QUOTA_BYTES");
        env::remove_var("API_CACHE_SWEEP_INTERVAL_SECS");

        let config = CacheConfig::from_env();
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert_eq!(config.default_ttl, Duration::from_millis(DEFAULT_TTL_MS));
        assert_eq!(config.quota_bytes, DEFAULT_QUOTA_BYTES);
        assert!(config.sweep_interval.is_none());

        env::set_var("API_CACHE_NAMESPACE", "spentoo_");
        env::set_var("API_CACHE_DEFAULT_TTL_MS", "1000");
        env::set_var("API_CACHE_QUOTA_BYTES", "not-a-number");
        env::set_var("API_CACHE_SWEEP_INTERVAL_SECS", "30");

        let config = CacheConfig::from_env();
        assert_eq!(config.namespace, "spentoo_");
        assert_eq!(config.default_ttl, Duration::from_secs(1));
        assert_eq!(config.quota_bytes, DEFAULT_QUOTA_BYTES);
        assert_eq!(config.sweep_interval, Some(Duration::from_secs(30)));

        env::remove_var("API_CACHE_NAMESPACE");
        env::remove_var("API_CACHE_DEFAULT_TTL_MS");
        env::remove_var("API_CACHE_QUOTA_BYTES");
        env::remove_var("API_CACHE_SWEEP_INTERVAL_SECS");
    }
}
