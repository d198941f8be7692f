//! In-memory notifier for tests and local runs.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

use crate::ports::{Notification, Notifier, NotifyError};

/// Records every notification instead of sending it.
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    sent: Mutex<Vec<Notification>>,
    failure: Option<NotifyError>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with the given error and nothing is recorded.
    pub fn failing(error: NotifyError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
        Ok(())
    }
}
