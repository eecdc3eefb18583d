//! Persisted policy state.
//!
//! The engine consumes a namespaced key-value contract: independent point
//! reads with a caller-supplied default. No transactional guarantees are
//! assumed across keys; the allow-lists are re-read on every check, so
//! eventual consistency between keys is acceptable. Writes belong to
//! administrative surfaces outside this crate.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::{MongoStore, StoreError};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Namespace holding the engine's own keys: `any_admin`, `default`,
/// `owner`, `sudo`, `support`, `masks`, `bounding_mask`.
pub const NS_SECURITY: &str = "security";

/// Namespace holding externally-owned global state (`blacklist_users`).
pub const NS_CORE: &str = "core";

/// Point-read access to persisted policy state.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// Read one key. `None` when the key is absent or unreadable.
    async fn get(&self, namespace: &str, key: &str) -> Option<Value>;
}

/// Read a key, falling back to `default` when it is absent or does not
/// decode as `T`.
pub async fn get_or<T: DeserializeOwned>(
    store: &dyn PolicyStore,
    namespace: &str,
    key: &str,
    default: T,
) -> T {
    match store.get(namespace, key).await {
        Some(value) => serde_json::from_value(value).unwrap_or(default),
        None => default,
    }
}
