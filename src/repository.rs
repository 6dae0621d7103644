use crate::job::timestamp_now;
use crate::{Job, JobError, JobStatus, KeyValueStore, Result, Transition};
use log::{debug, info};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Counter minting job ids.
pub const ID_COUNTER_KEY: &str = "id";
/// Counter behind the hit endpoint.
pub const HITS_KEY: &str = "hits";

pub type JobMap = BTreeMap<u64, Job>;

/// Job records stored as JSON under their decimal id. This is the only
/// writer of job keys.
#[derive(Clone)]
pub struct JobRepository {
    store: Arc<dyn KeyValueStore>,
    locks: Arc<Mutex<HashMap<u64, Arc<Mutex<()>>>>>,
}

impl std::fmt::Debug for JobRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRepository").finish_non_exhaustive()
    }
}

impl JobRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn job_key(id: u64) -> String {
        id.to_string()
    }

    /// Atomically bump the shared counter; the first id is 1.
    pub async fn mint_id(&self) -> Result<u64> {
        self.store.incr(ID_COUNTER_KEY).await
    }

    pub async fn create(&self, name: &str) -> Result<Job> {
        let id = self.mint_id().await?;
        let job = Job::new(id, name.to_string(), timestamp_now());

        self.update(&job).await?;

        info!("Created job {} ({})", job.id, job.name);
        Ok(job)
    }

    pub async fn exists(&self, id: u64) -> Result<bool> {
        self.store.exists(&Self::job_key(id)).await
    }

    pub async fn get(&self, id: u64) -> Result<Job> {
        let data = self.store.get(&Self::job_key(id)).await?;

        match data {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| JobError::DeserializationError(e.to_string())),
            None => Err(JobError::NotFound(id.to_string())),
        }
    }

    /// Overwrite the stored record for `job.id`.
    pub async fn update(&self, job: &Job) -> Result<()> {
        let serialized =
            serde_json::to_string(job).map_err(|e| JobError::SerializationError(e.to_string()))?;

        self.store.set(&Self::job_key(job.id), &serialized).await
    }

    /// Every job from 1 through the counter. Ids are never deleted, so the
    /// range has no gaps; a missing record surfaces as `NotFound`.
    pub async fn list_all(&self) -> Result<JobMap> {
        let counter = match self.store.get(ID_COUNTER_KEY).await? {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                JobError::DeserializationError(format!("invalid id counter {:?}: {}", raw, e))
            })?,
            None => return Ok(JobMap::new()),
        };

        let mut jobs = JobMap::new();
        for id in 1..=counter {
            jobs.insert(id, self.get(id).await?);
        }
        Ok(jobs)
    }

    pub async fn list_by_status(&self, status: JobStatus) -> Result<JobMap> {
        let mut jobs = self.list_all().await?;
        jobs.retain(|_, job| job.status == status);
        Ok(jobs)
    }

    /// Read, transition and write back one job. Calls for the same id are
    /// serialized so two requests cannot both act on the same prior state.
    pub async fn transition(&self, id: u64, transition: Transition) -> Result<Job> {
        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        let mut job = self.get(id).await?;
        job.apply(transition, timestamp_now())?;
        self.update(&job).await?;

        info!("Job {} is now {} after {}", job.id, job.status, transition);
        Ok(job)
    }

    async fn lock_for(&self, id: u64) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(id).or_default().clone()
    }

    pub async fn record_hit(&self) -> Result<u64> {
        let hits = self.store.incr(HITS_KEY).await?;
        debug!("Hit count is now {}", hits);
        Ok(hits)
    }

    pub async fn health_check(&self) -> Result<bool> {
        self.store.health_check().await
    }
}
