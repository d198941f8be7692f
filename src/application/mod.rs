//! Application layer - Orchestration between the domain and its ports.

pub mod handlers;
mod synthesis;

pub use handlers::{NotificationPolicy, PersistenceOutcome, SubmitIntakeHandler, SubmitIntakeResult};
pub use synthesis::SynthesisOrchestrator;
