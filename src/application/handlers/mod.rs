//! Application handlers.
//!
//! Command handlers that orchestrate domain operations across ports.

mod submit_intake;

pub use submit_intake::{
    NotificationPolicy, PersistenceOutcome, SubmitIntakeHandler, SubmitIntakeResult,
};
