use crate::{JobError, KeyValueStore, Result, RetryPolicy};
use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use log::info;
use redis::AsyncCommands;

#[derive(Clone)]
pub struct RedisStore {
    pool: Pool,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("pool", &self.pool.status())
            .finish()
    }
}

impl RedisStore {
    /// Builds the pool without touching the network.
    pub fn new(redis_url: &str) -> Result<Self> {
        let cfg = Config::from_url(redis_url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| JobError::ConfigError(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Builds the pool and waits until Redis answers a PING, retrying per
    /// `retry`. Later commands are not retried.
    pub async fn connect(redis_url: &str, retry: &RetryPolicy) -> Result<Self> {
        let store = Self::new(redis_url)?;
        let probe = &store;
        retry
            .run("Redis connection", move || probe.health_check())
            .await?;

        info!("Connected to Redis at {}", redis_url);
        Ok(store)
    }

    async fn get_conn(&self) -> Result<Connection> {
        self.pool.get().await.map_err(|e| {
            JobError::StorageError(format!("Failed to get Redis connection: {}", e))
        })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.get_conn().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_conn().await?;
        let found: bool = conn.exists(key).await?;
        Ok(found)
    }

    async fn incr(&self, key: &str) -> Result<u64> {
        let mut conn = self.get_conn().await?;
        let value: u64 = conn.incr(key, 1u64).await?;
        Ok(value)
    }

    async fn health_check(&self) -> Result<bool> {
        let mut conn = self.get_conn().await?;

        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        Ok(true)
    }
}
