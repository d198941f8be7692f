//! Notifier Port - Outbound e-mail notifications.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One plain-text e-mail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Port for delivering notifications.
///
/// Callers dispatch in the background and only log failures.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    async fn send(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Errors raised while sending a notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("email provider rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("notifier misconfigured: {0}")]
    Configuration(String),
}
