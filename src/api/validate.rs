use crate::{JobError, JobRepository, Result};
use std::collections::{BTreeSet, HashMap};

/// Form fields as submitted.
pub type Params = HashMap<String, String>;

/// The submitted parameter names must equal `required` as a set; extra
/// parameters fail just like missing ones.
pub fn require_exact(params: &Params, required: &[&str]) -> Result<()> {
    let supplied: BTreeSet<&str> = params.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = required.iter().copied().collect();

    if supplied == expected {
        Ok(())
    } else {
        Err(JobError::ParameterMismatch {
            required: expected.into_iter().map(str::to_string).collect(),
        })
    }
}

/// Exactly one `id` parameter naming a stored job. Returns the parsed id.
pub async fn require_job(repo: &JobRepository, params: &Params) -> Result<u64> {
    require_exact(params, &["id"])?;
    let raw = params.get("id").map(String::as_str).unwrap_or_default();
    require_existing(repo, raw).await
}

/// An id that does not parse cannot name a job and is reported the same
/// way as a missing one.
pub async fn require_existing(repo: &JobRepository, raw: &str) -> Result<u64> {
    let id = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| JobError::NotFound(raw.to_string()))?;

    if repo.exists(id).await? {
        Ok(id)
    } else {
        Err(JobError::NotFound(raw.to_string()))
    }
}
