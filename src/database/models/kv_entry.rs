//! Key-value document model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored setting, addressed by namespace and key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvEntry {
    /// Owning plugin, e.g. `core.afk`.
    pub namespace: String,
    pub key: String,
    pub value: Value,
    /// Last write time.
    #[serde(default = "Utc::now", with = "chrono::serde::ts_seconds")]
    pub updated_at: DateTime<Utc>,
}

impl KvEntry {
    pub fn new(namespace: &str, key: &str, value: Value) -> Self {
        Self {
            namespace: namespace.to_string(),
            key: key.to_string(),
            value,
            updated_at: Utc::now(),
        }
    }
}
