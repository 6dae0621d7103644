use crate::{JobError, Result};
use log::warn;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    Fixed(Duration),
    Exponential(Duration),
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        BackoffStrategy::Fixed(Duration::from_millis(500))
    }
}

impl BackoffStrategy {
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        match self {
            BackoffStrategy::Fixed(duration) => *duration,
            BackoffStrategy::Exponential(base) => {
                let multiplier = 2u32.saturating_pow(attempt);
                base.saturating_mul(multiplier)
            }
        }
    }

    pub fn fixed_millis(millis: u64) -> Self {
        Self::Fixed(Duration::from_millis(millis))
    }

    /// The delay before the first retry.
    pub fn base(&self) -> Duration {
        match self {
            BackoffStrategy::Fixed(base) | BackoffStrategy::Exponential(base) => *base,
        }
    }

    /// Same kind of strategy starting from `base`.
    pub fn with_base(&self, base: Duration) -> Self {
        match self {
            BackoffStrategy::Fixed(_) => BackoffStrategy::Fixed(base),
            BackoffStrategy::Exponential(_) => BackoffStrategy::Exponential(base),
        }
    }
}

/// Bounded retry used when first connecting to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: BackoffStrategy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff: BackoffStrategy::default(),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: BackoffStrategy) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    pub fn no_retry() -> Self {
        Self::new(0, BackoffStrategy::Fixed(Duration::ZERO))
    }

    /// Runs `op` until it succeeds or `max_retries` retries have failed,
    /// sleeping between attempts. Exhaustion yields `StoreUnavailable`.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.max_retries => {
                    return Err(JobError::StoreUnavailable(format!(
                        "{} failed after {} attempts: {}",
                        what,
                        attempt + 1,
                        e
                    )));
                }
                Err(e) => {
                    let delay = self.backoff.calculate_delay(attempt);
                    warn!(
                        "{} failed (attempt {} of {}): {}; retrying in {:?}",
                        what,
                        attempt + 1,
                        self.max_retries + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
