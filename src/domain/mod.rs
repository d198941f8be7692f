//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps)
//! - `intake` - Questionnaire schema, validation and wizard state machine
//! - `report` - Report document model, prompt templates and error taxonomy

pub mod foundation;
pub mod intake;
pub mod report;
