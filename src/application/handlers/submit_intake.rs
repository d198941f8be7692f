//! SubmitIntakeHandler - Runs a submitted record through the pipeline.
//!
//! 1. Persist through the gateway, falling back to the local queue.
//! 2. Dispatch notifications in the background.
//! 3. Synthesize the report.
//!
//! Only synthesis can fail the pipeline.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::SynthesisOrchestrator;
use crate::domain::intake::{
    confirmation_message, confirmation_subject, operator_subject, operator_summary, IntakeRecord,
};
use crate::domain::report::{ParsedDocument, SynthesisError};
use crate::ports::{FallbackEntry, FallbackQueue, Notification, Notifier, SubmissionGateway};

/// Where the record ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceOutcome {
    /// Stored by the primary gateway.
    Saved,
    /// Primary store failed; the record is in the fallback queue.
    Queued,
    /// Both stores failed.
    Lost,
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct SubmitIntakeResult {
    pub record: IntakeRecord,
    pub persistence: PersistenceOutcome,
    pub document: ParsedDocument,
}

/// Notification addressing.
#[derive(Debug, Clone)]
pub struct NotificationPolicy {
    /// Receives the full summary of every submission.
    pub operator_email: String,
    /// Also confirm receipt to the submitter when an address was given.
    pub send_confirmation: bool,
}

/// Handler for submitted intake records.
pub struct SubmitIntakeHandler {
    gateway: Arc<dyn SubmissionGateway>,
    fallback: Arc<dyn FallbackQueue>,
    notifier: Arc<dyn Notifier>,
    orchestrator: Arc<SynthesisOrchestrator>,
    policy: NotificationPolicy,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl SubmitIntakeHandler {
    pub fn new(
        gateway: Arc<dyn SubmissionGateway>,
        fallback: Arc<dyn FallbackQueue>,
        notifier: Arc<dyn Notifier>,
        orchestrator: Arc<SynthesisOrchestrator>,
        policy: NotificationPolicy,
    ) -> Self {
        Self {
            gateway,
            fallback,
            notifier,
            orchestrator,
            policy,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub async fn handle(&self, record: IntakeRecord) -> Result<SubmitIntakeResult, SynthesisError> {
        let persistence = self.persist(&record).await;
        self.dispatch_notifications(&record);
        let document = self.orchestrator.synthesize(&record).await?;

        Ok(SubmitIntakeResult {
            record,
            persistence,
            document,
        })
    }

    async fn persist(&self, record: &IntakeRecord) -> PersistenceOutcome {
        let err = match self.gateway.save(record).await {
            Ok(()) => {
                info!(record_id = %record.id(), kind = %record.kind(), "Submission saved");
                return PersistenceOutcome::Saved;
            }
            Err(err) => err,
        };

        warn!(
            record_id = %record.id(),
            kind = %record.kind(),
            error = %err,
            "Failed to save submission, writing to fallback queue"
        );

        match self
            .fallback
            .append(FallbackEntry::new(record.clone(), err.to_string()))
            .await
        {
            Ok(()) => PersistenceOutcome::Queued,
            Err(fallback_err) => {
                error!(
                    record_id = %record.id(),
                    kind = %record.kind(),
                    error = %fallback_err,
                    "Fallback queue rejected submission"
                );
                PersistenceOutcome::Lost
            }
        }
    }

    /// Waits for every notification dispatched so far.
    ///
    /// The pipeline itself never waits; short-lived callers use this before
    /// shutting the runtime down.
    pub async fn flush_notifications(&self) {
        let pending = std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner));
        for handle in pending {
            if let Err(e) = handle.await {
                warn!(error = %e, "Notification task aborted");
            }
        }
    }

    /// Spawns one task per notification. Failures are logged by the task.
    fn dispatch_notifications(&self, record: &IntakeRecord) {
        let mut notifications = vec![Notification::new(
            &self.policy.operator_email,
            operator_subject(record),
            operator_summary(record),
        )];

        if self.policy.send_confirmation {
            if let Some(email) = record.submitter_email() {
                notifications.push(Notification::new(
                    email,
                    confirmation_subject(record),
                    confirmation_message(record),
                ));
            }
        }

        let record_id = record.id();
        let handles = notifications.into_iter().map(|notification| {
            let notifier = Arc::clone(&self.notifier);
            tokio::spawn(async move {
                let to = notification.to.clone();
                if let Err(e) = notifier.send(notification).await {
                    warn!(record_id = %record_id, to = %to, error = %e, "Failed to send notification");
                }
            })
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|handle| !handle.is_finished());
        pending.extend(handles);
    }
}
