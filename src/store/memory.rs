//! In-memory policy store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::PolicyStore;

/// Process-local [`PolicyStore`] backed by a hash map.
///
/// Used by the test suite and by embedders that manage policy state
/// without a database. Nothing persists across restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<(String, String), Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one key.
    pub fn set(&self, namespace: &str, key: &str, value: Value) {
        self.entries
            .write()
            .insert((namespace.to_string(), key.to_string()), value);
    }

    /// Delete one key. Returns `true` if it existed.
    pub fn remove(&self, namespace: &str, key: &str) -> bool {
        self.entries
            .write()
            .remove(&(namespace.to_string(), key.to_string()))
            .is_some()
    }
}

#[async_trait]
impl PolicyStore for MemoryStore {
    async fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        self.entries
            .read()
            .get(&(namespace.to_string(), key.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::NS_SECURITY;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get(NS_SECURITY, "any_admin").await, None);

        store.set(NS_SECURITY, "any_admin", json!(true));
        assert_eq!(store.get(NS_SECURITY, "any_admin").await, Some(json!(true)));

        assert!(store.remove(NS_SECURITY, "any_admin"));
        assert_eq!(store.get(NS_SECURITY, "any_admin").await, None);
    }

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let store = MemoryStore::new();
        store.set("a", "key", json!(1));
        store.set("b", "key", json!(2));
        assert_eq!(store.get("a", "key").await, Some(json!(1)));
        assert_eq!(store.get("b", "key").await, Some(json!(2)));
    }
}
