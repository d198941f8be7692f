//! Foundation module - Shared domain primitives.
//!
//! Identifiers and time values used across the intake and report modules.

mod ids;
mod timestamp;

pub use ids::SubmissionId;
pub use timestamp::Timestamp;
