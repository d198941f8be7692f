//! In-memory submission gateway and fallback queue.

use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::intake::IntakeRecord;
use crate::ports::{FallbackEntry, FallbackQueue, PersistenceError, SubmissionGateway};

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Stores saved records in a vector.
#[derive(Debug, Default)]
pub struct InMemorySubmissionGateway {
    records: Mutex<Vec<IntakeRecord>>,
    failure: Option<PersistenceError>,
}

impl InMemorySubmissionGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every save fails with the given error.
    pub fn failing(error: PersistenceError) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    pub fn records(&self) -> Vec<IntakeRecord> {
        locked(&self.records).clone()
    }

    pub fn len(&self) -> usize {
        locked(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionGateway for InMemorySubmissionGateway {
    async fn save(&self, record: &IntakeRecord) -> Result<(), PersistenceError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        locked(&self.records).push(record.clone());
        Ok(())
    }
}

/// Append-only vector of fallback entries.
#[derive(Debug, Default)]
pub struct InMemoryFallbackQueue {
    entries: Mutex<Vec<FallbackEntry>>,
}

impl InMemoryFallbackQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FallbackQueue for InMemoryFallbackQueue {
    async fn append(&self, entry: FallbackEntry) -> Result<(), PersistenceError> {
        locked(&self.entries).push(entry);
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<FallbackEntry>, PersistenceError> {
        Ok(locked(&self.entries).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::{demo_values, IntakeKind, WizardEngine};

    fn record() -> IntakeRecord {
        let mut wizard = WizardEngine::new(IntakeKind::SwotAnalysis);
        wizard.prefill(demo_values(IntakeKind::SwotAnalysis));
        while !wizard.is_at_terminal() {
            wizard.advance();
        }
        wizard.submit().unwrap()
    }

    #[tokio::test]
    async fn saves_records_in_order() {
        let gateway = InMemorySubmissionGateway::new();
        let first = record();
        let second = record();

        gateway.save(&first).await.unwrap();
        gateway.save(&second).await.unwrap();

        let ids: Vec<_> = gateway.records().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);
    }

    #[tokio::test]
    async fn failing_gateway_stores_nothing() {
        let gateway = InMemorySubmissionGateway::failing(PersistenceError::unavailable("down"));

        let err = gateway.save(&record()).await.unwrap_err();

        assert_eq!(err, PersistenceError::unavailable("down"));
        assert!(gateway.is_empty());
    }

    #[tokio::test]
    async fn queue_returns_entries_oldest_first() {
        let queue = InMemoryFallbackQueue::new();
        queue.append(FallbackEntry::new(record(), "first")).await.unwrap();
        queue.append(FallbackEntry::new(record(), "second")).await.unwrap();

        let reasons: Vec<_> = queue.entries().await.unwrap().into_iter().map(|e| e.reason).collect();
        assert_eq!(reasons, vec!["first", "second"]);
    }
}
