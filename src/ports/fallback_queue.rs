//! Fallback Queue Port - Local append-only backup of unsaved records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::intake::IntakeRecord;

use super::PersistenceError;

/// A record that could not be persisted, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackEntry {
    pub record: IntakeRecord,
    pub reason: String,
    pub queued_at: Timestamp,
}

impl FallbackEntry {
    pub fn new(record: IntakeRecord, reason: impl Into<String>) -> Self {
        Self {
            record,
            reason: reason.into(),
            queued_at: Timestamp::now(),
        }
    }
}

/// Port for the append-only backup store.
///
/// Entries are never modified or removed through this port; replaying them
/// into the primary store is an operator task.
#[async_trait]
pub trait FallbackQueue: Send + Sync {
    /// Append one entry.
    async fn append(&self, entry: FallbackEntry) -> Result<(), PersistenceError>;

    /// All entries, oldest first.
    async fn entries(&self) -> Result<Vec<FallbackEntry>, PersistenceError>;
}
