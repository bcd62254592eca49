//! Cache configuration.

use std::time::Duration;

/// Configuration for a cache instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    pub max_capacity: u64,

    /// Time-to-live for cache entries.
    /// After this duration, entries are automatically evicted.
    pub ttl: Duration,
}

impl CacheConfig {
    /// Config for small, rarely changing settings read on hot paths.
    /// Low capacity, long TTL; writes go through the cache anyway.
    pub fn settings() -> Self {
        Self {
            max_capacity: 1_000,
            ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}
