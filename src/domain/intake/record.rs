//! Intake Record - The frozen answers of a finished wizard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{SubmissionId, Timestamp};

use super::field_value::{FieldValue, FieldValues};

/// Which questionnaire produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntakeKind {
    /// The 13-step marketing diagnosis.
    BusinessBriefing,
    /// The SWOT strategic audit.
    SwotAnalysis,
}

impl IntakeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeKind::BusinessBriefing => "business-briefing",
            IntakeKind::SwotAnalysis => "swot-analysis",
        }
    }

    /// Title used in notifications and exports.
    pub fn display_name(&self) -> &'static str {
        match self {
            IntakeKind::BusinessBriefing => "Diagnóstico de Marketing",
            IntakeKind::SwotAnalysis => "Auditoria Estratégica SWOT",
        }
    }
}

impl fmt::Display for IntakeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IntakeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "business-briefing" => Ok(IntakeKind::BusinessBriefing),
            "swot-analysis" => Ok(IntakeKind::SwotAnalysis),
            other => Err(format!("unknown intake kind: {}", other)),
        }
    }
}

/// Immutable snapshot produced by a successful submit.
///
/// Fields are private and there is no mutating API; clone the values out if
/// another wizard needs to be seeded from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeRecord {
    id: SubmissionId,
    kind: IntakeKind,
    values: FieldValues,
    submitted_at: Timestamp,
}

impl IntakeRecord {
    pub(crate) fn new(kind: IntakeKind, values: FieldValues) -> Self {
        Self {
            id: SubmissionId::new(),
            kind,
            values,
            submitted_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> SubmissionId {
        self.id
    }

    pub fn kind(&self) -> IntakeKind {
        self.kind
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text of a field, or `None` when missing or blank.
    pub fn text(&self, name: &str) -> Option<String> {
        self.values
            .get(name)
            .filter(|v| !v.is_blank())
            .map(ToString::to_string)
    }

    pub fn submitted_at(&self) -> Timestamp {
        self.submitted_at
    }

    /// Company name, used for export file names and e-mail subjects.
    pub fn company_name(&self) -> Option<String> {
        self.text("companyName")
    }

    /// The submitter's e-mail address, if one was given.
    pub fn submitter_email(&self) -> Option<String> {
        self.text("email")
    }

    /// The submitter's name, whichever form asked for it.
    pub fn submitter_name(&self) -> Option<String> {
        self.text("responsibleName").or_else(|| self.text("name"))
    }
}
