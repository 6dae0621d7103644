use crate::{JobError, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

/// Minute-resolution UTC timestamps; lexical order matches time order.
pub type Timestamp = String;

pub fn timestamp_now() -> Timestamp {
    format_timestamp(OffsetDateTime::now_utc())
}

pub fn format_timestamp(at: OffsetDateTime) -> Timestamp {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    // Only fails for years outside 0..=9999.
    at.format(format)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub name: String,
    pub status: JobStatus,
    pub created: Timestamp,
    pub last_updated: Timestamp,
}

impl Job {
    pub fn new(id: u64, name: String, now: Timestamp) -> Self {
        Self {
            id,
            name,
            status: JobStatus::Running,
            created: now.clone(),
            last_updated: now,
        }
    }

    /// Moves the job along `transition`, leaving it untouched if the
    /// current status does not allow it.
    pub fn apply(&mut self, transition: Transition, now: Timestamp) -> Result<()> {
        let next = transition.apply_to(self.status)?;
        self.status = next;
        self.last_updated = now;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    Running,
    Paused,
    Stopped,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Running, JobStatus::Paused, JobStatus::Stopped];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Running => "RUNNING",
            JobStatus::Paused => "PAUSED",
            JobStatus::Stopped => "STOPPED",
        }
    }
}

impl std::str::FromStr for JobStatus {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RUNNING" => Ok(JobStatus::Running),
            "PAUSED" => Ok(JobStatus::Paused),
            "STOPPED" => Ok(JobStatus::Stopped),
            _ => Err(JobError::InvalidFilter(format!(
                "Invalid status filter: {}. Must be one of RUNNING, PAUSED, STOPPED.",
                s
            ))),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status changes a client can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Pause,
    Resume,
    Stop,
}

impl Transition {
    pub fn allowed_from(&self) -> &'static [JobStatus] {
        match self {
            Transition::Pause => &[JobStatus::Running],
            Transition::Resume => &[JobStatus::Paused],
            Transition::Stop => &[JobStatus::Running, JobStatus::Paused],
        }
    }

    pub fn target(&self) -> JobStatus {
        match self {
            Transition::Pause => JobStatus::Paused,
            Transition::Resume => JobStatus::Running,
            Transition::Stop => JobStatus::Stopped,
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Transition::Pause => "paused",
            Transition::Resume => "resumed",
            Transition::Stop => "stopped",
        }
    }

    /// The status reached by applying this transition to `current`.
    pub fn apply_to(&self, current: JobStatus) -> Result<JobStatus> {
        let allowed = self.allowed_from();
        if allowed.contains(&current) {
            return Ok(self.target());
        }

        let required = allowed
            .iter()
            .map(JobStatus::as_str)
            .collect::<Vec<_>>()
            .join(" or ");

        Err(JobError::InvalidTransition {
            required,
            action: self.past_tense(),
            actual: current.to_string(),
        })
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Transition::Pause => "pause",
            Transition::Resume => "resume",
            Transition::Stop => "stop",
        };
        write!(f, "{}", name)
    }
}
