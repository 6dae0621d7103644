//! Uniform response body shared by every route.

use crate::{JobError, Result};
use actix_web::HttpResponse;
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a request before it is flattened onto the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Success {
        message: Option<String>,
        data: Map<String, Value>,
    },
    Failure {
        message: String,
    },
}

impl Reply {
    pub fn message(message: impl Into<String>) -> Self {
        Reply::Success {
            message: Some(message.into()),
            data: Map::new(),
        }
    }

    /// Success carrying `data`, which must serialize to a JSON object.
    pub fn with_data<T: Serialize>(message: impl Into<String>, data: &T) -> Result<Self> {
        match serde_json::to_value(data) {
            Ok(Value::Object(data)) => Ok(Reply::Success {
                message: Some(message.into()),
                data,
            }),
            Ok(other) => Err(JobError::SerializationError(format!(
                "response data must be an object, got {}",
                other
            ))),
            Err(e) => Err(JobError::SerializationError(e.to_string())),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Reply::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success { .. })
    }

    /// Always 200; the envelope's `success` flag carries the outcome.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::Ok().json(Envelope::from(self))
    }
}

impl From<JobError> for Reply {
    fn from(err: JobError) -> Self {
        if err.is_internal() {
            error!("Request failed: {}", err);
        }
        Reply::failure(err.to_string())
    }
}

impl From<Result<Reply>> for Reply {
    fn from(result: Result<Reply>) -> Self {
        result.unwrap_or_else(Reply::from)
    }
}

/// Wire form of a [`Reply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub response: Option<String>,
    pub error_message: Option<String>,
    pub data: Map<String, Value>,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            success: true,
            response: None,
            error_message: None,
            data: Map::new(),
        }
    }
}

impl From<Reply> for Envelope {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::Success { message, data } => Envelope {
                response: message,
                data,
                ..Default::default()
            },
            Reply::Failure { message } => Envelope {
                success: false,
                error_message: Some(message),
                ..Default::default()
            },
        }
    }
}
