//! MongoDB-backed key-value store.
//!
//! One document per `(namespace, key)` in the `kv` collection.
//! Uses caching to minimize database access.

use anyhow::Result;
use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::doc;
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheConfig, TypedCache};
use super::models::KvEntry;
use super::store::KvStore;
use super::Database;

/// Repository for namespaced key-value settings.
pub struct KvRepository {
    collection: Collection<KvEntry>,
    cache: TypedCache<(String, String), Value>,
}

impl KvRepository {
    /// Create a new repository instance with caching.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("kv"),
            cache: TypedCache::new(CacheConfig::settings()),
        }
    }

    fn cache_key(namespace: &str, key: &str) -> (String, String) {
        (namespace.to_string(), key.to_string())
    }
}

#[async_trait]
impl KvStore for KvRepository {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<Value>> {
        let cache_key = Self::cache_key(namespace, key);

        // Check cache first
        if let Some(value) = self.cache.get(&cache_key) {
            return Ok(Some(value));
        }

        let filter = doc! { "namespace": namespace, "key": key };
        let entry = self.collection.find_one(filter).await?;
        debug!("DB get kv {}/{}: {:?}", namespace, key, entry.is_some());

        let value = entry.map(|e| e.value);
        if let Some(v) = &value {
            self.cache.insert(cache_key, v.clone());
        }

        Ok(value)
    }

    async fn set(&self, namespace: &str, key: &str, value: Value) -> Result<()> {
        let filter = doc! { "namespace": namespace, "key": key };
        let entry = KvEntry::new(namespace, key, value.clone());
        let options = mongodb::options::ReplaceOptions::builder()
            .upsert(true)
            .build();

        self.collection
            .replace_one(filter, &entry)
            .with_options(options)
            .await?;

        self.cache.insert(Self::cache_key(namespace, key), value);
        debug!("Saved kv {}/{}", namespace, key);
        Ok(())
    }

    async fn remove(&self, namespace: &str, key: &str) -> Result<bool> {
        let filter = doc! { "namespace": namespace, "key": key };
        let result = self.collection.delete_one(filter).await?;

        self.cache.invalidate(&Self::cache_key(namespace, key));
        debug!("Deleted kv {}/{}: {}", namespace, key, result.deleted_count > 0);
        Ok(result.deleted_count > 0)
    }
}
