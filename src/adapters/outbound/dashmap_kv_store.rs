//! DashMap Key-Value Store
//!
//! Implements KeyValueStore in memory. Values live as long as the process,
//! which matches a single console session without a storage file.

use crate::domain::ports::KeyValueStore;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// DashMap-backed key-value store.
pub struct DashMapKeyValueStore {
    values: Arc<DashMap<String, String>>,
}

impl DashMapKeyValueStore {
    pub fn new() -> Self {
        Self {
            values: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for DashMapKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for DashMapKeyValueStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|e| e.value().clone())
    }

    async fn set(&self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        tracing::debug!("stored {}={}", key, value);
    }
}
