use crate::{JobError, KeyValueStore, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process store with the same semantics as the Redis client. Values
/// live only as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.entries.read().await.contains_key(key))
    }

    async fn incr(&self, key: &str) -> Result<u64> {
        let mut entries = self.entries.write().await;

        let current = match entries.get(key) {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                JobError::StorageError(format!("value under {} is not an integer", key))
            })?,
            None => 0,
        };

        let next = current.checked_add(1).ok_or_else(|| {
            JobError::StorageError(format!("increment of {} would overflow", key))
        })?;
        entries.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
