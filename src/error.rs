use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("This endpoint requires exactly these parameters: {}", .required.join(", "))]
    ParameterMismatch { required: Vec<String> },

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Job with id {0} not found.")]
    NotFound(String),

    #[error("Only {required} jobs can be {action}. This job is {actual}.")]
    InvalidTransition {
        required: String,
        action: &'static str,
        actual: String,
    },

    #[error("{0}")]
    InvalidFilter(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl JobError {
    /// Failures caused by the backing store or the record codec rather than
    /// by the request itself.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            JobError::StoreUnavailable(_)
                | JobError::StorageError(_)
                | JobError::SerializationError(_)
                | JobError::DeserializationError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, JobError>;

impl From<redis::RedisError> for JobError {
    fn from(value: redis::RedisError) -> Self {
        JobError::StorageError(value.to_string())
    }
}
