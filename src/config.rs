use crate::{
    BackoffStrategy, JobError, KeyValueStore, MemoryStore, RedisStore, Result, RetryPolicy,
};
use log::info;
use std::sync::Arc;
use std::time::Duration;

pub const MEMORY_STORE_URL: &str = "memory://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub store_url: String,
    pub connect_retry: RetryPolicy,
    /// 0 lets actix start one worker per core.
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            store_url: "redis://redis:6379".to_string(),
            connect_retry: RetryPolicy::default(),
            workers: 0,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whichever `JOBKEEPER_*` variables `lookup`
    /// returns.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind) = lookup("JOBKEEPER_BIND") {
            config.bind_addr = bind;
        }
        if let Some(url) = lookup("JOBKEEPER_STORE_URL") {
            config.store_url = url;
        }
        if let Some(raw) = lookup("JOBKEEPER_CONNECT_RETRIES") {
            config.connect_retry.max_retries = parse_number("JOBKEEPER_CONNECT_RETRIES", &raw)?;
        }
        if let Some(kind) = lookup("JOBKEEPER_RETRY_BACKOFF") {
            let base = config.connect_retry.backoff.base();
            config.connect_retry.backoff = match kind.trim() {
                "fixed" => BackoffStrategy::Fixed(base),
                "exponential" => BackoffStrategy::Exponential(base),
                other => {
                    return Err(JobError::ConfigError(format!(
                        "JOBKEEPER_RETRY_BACKOFF={:?}: expected fixed or exponential",
                        other
                    )));
                }
            };
        }
        if let Some(raw) = lookup("JOBKEEPER_RETRY_INTERVAL_MS") {
            let millis = parse_number("JOBKEEPER_RETRY_INTERVAL_MS", &raw)?;
            config.connect_retry.backoff = config
                .connect_retry
                .backoff
                .with_base(Duration::from_millis(millis));
        }
        if let Some(raw) = lookup("JOBKEEPER_WORKERS") {
            config.workers = parse_number("JOBKEEPER_WORKERS", &raw)?;
        }

        Ok(config)
    }

    /// Opens the configured store. Redis is probed with the connect retry
    /// policy; `memory://` needs no connection.
    pub async fn open_store(&self) -> Result<Arc<dyn KeyValueStore>> {
        if self.store_url == MEMORY_STORE_URL {
            info!("Using in-memory store; jobs will not survive a restart");
            return Ok(Arc::new(MemoryStore::new()));
        }

        let store = RedisStore::connect(&self.store_url, &self.connect_retry).await?;
        Ok(Arc::new(store))
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| JobError::ConfigError(format!("{}={:?}: {}", key, raw, e)))
}
