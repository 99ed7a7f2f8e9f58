use crate::http::status::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Status and payload of a service answer
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status_code: StatusCode,
    pub body: Value,
}

/// Tagged result of a topic operation. Both arms are ordinary HTTP answers;
/// the tag only tells success from a domain error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Reply),
    Error(Reply),
}

impl Outcome {
    pub fn success(status_code: StatusCode, body: Value) -> Self {
        Outcome::Success(Reply { status_code, body })
    }

    pub fn error(status_code: StatusCode, message: &str) -> Self {
        Outcome::Error(Reply {
            status_code,
            body: Value::String(message.to_string()),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn reply(&self) -> &Reply {
        match self {
            Outcome::Success(reply) | Outcome::Error(reply) => reply,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.reply().status_code
    }

    pub fn into_reply(self) -> Reply {
        match self {
            Outcome::Success(reply) | Outcome::Error(reply) => reply,
        }
    }
}

/// Failure of the storage layer itself, as opposed to a domain error
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

pub type ServiceResult = Result<Outcome, ServiceError>;
