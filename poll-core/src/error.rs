use crate::poll::PollId;
use thiserror::Error;

/// Every failure the adapter hands to the UI.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum PollError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Remote(String),

    #[error("poll #{0} not found")]
    NotFound(PollId),
}

impl PollError {
    pub fn validation(msg: impl Into<String>) -> Self {
        PollError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PollError::Validation(_))
    }
}

/// Failures raised by a `PollService` implementation.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ServiceError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed reply: {0}")]
    Malformed(String),
}

impl From<ServiceError> for PollError {
    fn from(err: ServiceError) -> Self {
        PollError::Remote(err.to_string())
    }
}
