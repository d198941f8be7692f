//! Intake module - Multi-step questionnaire engine.
//!
//! # Components
//!
//! - `validator` - Pure per-field rule checks
//! - `step` - Declarative step schema with conditional fields
//! - `catalog` - Built-in schemas for each questionnaire
//! - `wizard` - State machine driving validation and navigation
//! - `record` - Frozen answers produced on submit

mod catalog;
mod demo;
mod errors;
mod field_value;
mod record;
mod step;
mod summary;
mod validator;
mod wizard;

pub use catalog::{business_briefing_steps, schema_for, swot_analysis_steps};
pub use demo::demo_values;
pub use errors::{FieldError, FieldErrorKind, SchemaError, WizardError};
pub use field_value::{FieldValue, FieldValues};
pub use record::{IntakeKind, IntakeRecord};
pub use step::{DisplayCondition, FieldShape, FieldSpec, StepDefinition, StepSchema};
pub use summary::{confirmation_message, confirmation_subject, operator_subject, operator_summary};
pub use validator::{format_phone_br, validate, validate_all, RuleKind};
pub use wizard::{AdvanceOutcome, WizardEngine, INCOMPLETE_STEP_MESSAGE};
