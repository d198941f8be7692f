//! Submission Gateway Port - Durable storage of submitted records.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::intake::IntakeRecord;

/// Port for persisting submitted intake records.
///
/// Failures are never fatal for the pipeline: the record is queued to the
/// fallback store and synthesis continues.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Store one record.
    async fn save(&self, record: &IntakeRecord) -> Result<(), PersistenceError>;
}

/// Errors raised while persisting a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The store refused the record (constraint, permission).
    #[error("record rejected: {0}")]
    Rejected(String),

    /// The record could not be encoded or decoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Local file system failure.
    #[error("io error: {0}")]
    Io(String),
}

impl PersistenceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
