//! Key-value store clients backing the job repository

pub mod memory;
pub mod redis;
pub mod retry;
pub mod traits;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;
pub use self::retry::{BackoffStrategy, RetryPolicy};
pub use self::traits::KeyValueStore;
