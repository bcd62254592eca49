//! Namespaced key-value store.
//!
//! Plugins keep their small settings here. The store itself is opaque:
//! values are JSON, addressed by `(namespace, key)`.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

/// Key-value persistence used by plugins.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read a value. `None` means the caller's default applies.
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<()>;

    /// Delete a value. Returns whether something was removed.
    async fn remove(&self, namespace: &str, key: &str) -> Result<bool>;

    /// Read a string value, treating other JSON types as absent.
    async fn get_string(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        Ok(self
            .get(namespace, key)
            .await?
            .and_then(|v| v.as_str().map(str::to_string)))
    }
}

/// Process-local store, used when no database is configured.
///
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: DashMap<(String, String), Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>> {
        let entry = self.data.get(&(namespace.to_string(), key.to_string()));
        Ok(entry.map(|v| v.value().clone()))
    }

    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<()> {
        self.data
            .insert((namespace.to_string(), key.to_string()), value);
        Ok(())
    }

    async fn remove(&self, namespace: &str, key: &str) -> Result<bool> {
        Ok(self
            .data
            .remove(&(namespace.to_string(), key.to_string()))
            .is_some())
    }
}
