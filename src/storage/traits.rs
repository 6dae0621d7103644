use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Check whether `key` holds a value
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Atomically increment the integer under `key` and return the new value.
    /// A missing key counts as 0.
    async fn incr(&self, key: &str) -> Result<u64>;

    /// Check if storage is healthy
    async fn health_check(&self) -> Result<bool>;
}
