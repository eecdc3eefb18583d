//! Cache configuration.

use std::time::Duration;

/// Tuning for a [`super::TypedCache`] instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries before LRU eviction kicks in.
    pub max_capacity: u64,

    /// Time-to-live for entries. `None` means entries only leave by
    /// capacity eviction or explicit invalidation.
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Some(Duration::from_secs(300)),
        }
    }
}

impl CacheConfig {
    /// Config with the given capacity and the default TTL.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            max_capacity,
            ..Default::default()
        }
    }

    /// Set the time-to-live for entries.
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = Some(duration);
        self
    }

    /// Preset for chat role lookups: results go stale after five minutes,
    /// bounding how often the host chat service is queried per chat/user.
    pub fn role_lookup() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Some(Duration::from_secs(5 * 60)),
        }
    }
}
