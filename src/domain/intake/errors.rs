//! Error types for the intake module.

use thiserror::Error;

/// The way a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldErrorKind {
    /// Value is missing or blank.
    Required,
    /// Value does not look like an e-mail address.
    InvalidEmail,
    /// Value does not have 10 or 11 digits.
    InvalidPhone,
    /// Value is missing, not numeric, or outside the scale.
    OutOfRange { min: f64, max: f64 },
}

/// A validation failure attached to one field.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("field '{field}' is invalid: {kind:?}")]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, FieldErrorKind::Required)
    }

    pub fn invalid_email(field: impl Into<String>) -> Self {
        Self::new(field, FieldErrorKind::InvalidEmail)
    }

    pub fn invalid_phone(field: impl Into<String>) -> Self {
        Self::new(field, FieldErrorKind::InvalidPhone)
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(field, FieldErrorKind::OutOfRange { min, max })
    }

    /// Message shown next to the highlighted field.
    pub fn user_message(&self) -> String {
        match self.kind {
            FieldErrorKind::Required => "Este campo é obrigatório.".to_string(),
            FieldErrorKind::InvalidEmail => "Informe um e-mail válido.".to_string(),
            FieldErrorKind::InvalidPhone => {
                "Informe um telefone válido com DDD (10 ou 11 dígitos).".to_string()
            }
            FieldErrorKind::OutOfRange { min, max } => {
                format!("Escolha uma nota entre {} e {}.", min, max)
            }
        }
    }
}

/// Problems detected while assembling a step schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("step schema has no steps")]
    Empty,

    #[error("step at position {position} declares index {index}")]
    NonContiguousIndex { position: usize, index: usize },

    #[error("step schema must have exactly one terminal step, found {count}")]
    TerminalCount { count: usize },

    #[error("terminal step must be last, found at index {index}")]
    TerminalNotLast { index: usize },

    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("field '{field}' depends on unknown field '{depends_on}'")]
    UnknownConditionField { field: String, depends_on: String },
}

/// Wizard operations that cannot complete.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("submission is only possible from the final step")]
    NotAtTerminalStep,

    #[error("step {step} has invalid fields: {}", .fields.join(", "))]
    Incomplete { step: usize, fields: Vec<String> },
}

impl WizardError {
    /// Message for the form banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            WizardError::NotAtTerminalStep => "Conclua todas as etapas antes de enviar.",
            WizardError::Incomplete { .. } => super::wizard::INCOMPLETE_STEP_MESSAGE,
        }
    }
}
