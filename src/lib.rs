//! A small HTTP service tracking the lifecycle of named jobs in a shared
//! key-value store.
//!
//! Jobs are created `RUNNING` and move between states through three
//! transitions:
//!
//! | Transition | From               | To        |
//! |------------|--------------------|-----------|
//! | pause      | `RUNNING`          | `PAUSED`  |
//! | resume     | `PAUSED`           | `RUNNING` |
//! | stop       | `RUNNING`/`PAUSED` | `STOPPED` |
//!
//! Records live in Redis (or an in-process [`MemoryStore`]) as JSON under
//! their decimal id, and ids are minted from the `id` counter key.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jobkeeper::{JobRepository, RedisStore, RetryPolicy, Transition};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = RedisStore::connect("redis://localhost:6379", &RetryPolicy::default()).await?;
//!     let repo = JobRepository::new(Arc::new(store));
//!
//!     let job = repo.create("backup").await?;
//!     let job = repo.transition(job.id, Transition::Pause).await?;
//!     println!("job {} is {}", job.id, job.status);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod job;
pub mod repository;
pub mod storage;

pub use config::ServerConfig;
pub use error::{JobError, Result};
pub use job::{Job, JobStatus, Transition};
pub use repository::{JobMap, JobRepository};
pub use storage::{BackoffStrategy, KeyValueStore, MemoryStore, RedisStore, RetryPolicy};
