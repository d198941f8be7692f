//! Field Validator - Pure checks for individual answers.
//!
//! Each [`RuleKind`] is checked in isolation. Format rules (`Email`,
//! `PhoneBr`) only inspect values that are present; emptiness is the
//! responsibility of `Required`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::FieldError;
use super::field_value::FieldValue;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// A declarative validation rule attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleKind {
    /// Value must be present and non-blank.
    Required,
    /// Value, when present, must look like an e-mail address.
    Email,
    /// Value, when present, must contain 10 or 11 digits (DDD + number).
    PhoneBr,
    /// Value must be a number inside `[min, max]`.
    Range { min: f64, max: f64 },
}

impl RuleKind {
    /// True for rules that reject a missing value.
    pub fn demands_value(&self) -> bool {
        matches!(self, RuleKind::Required | RuleKind::Range { .. })
    }
}

/// Checks one rule against one value.
pub fn validate(field: &str, rule: &RuleKind, value: Option<&FieldValue>) -> Result<(), FieldError> {
    match rule {
        RuleKind::Required => match value {
            Some(v) if !v.is_blank() => Ok(()),
            _ => Err(FieldError::required(field)),
        },
        RuleKind::Email => match present_text(value) {
            None => Ok(()),
            Some(text) if EMAIL_RE.is_match(text.trim()) => Ok(()),
            Some(_) => Err(FieldError::invalid_email(field)),
        },
        RuleKind::PhoneBr => match present_text(value) {
            None => Ok(()),
            Some(text) => {
                let digits = text.chars().filter(char::is_ascii_digit).count();
                if (10..=11).contains(&digits) {
                    Ok(())
                } else {
                    Err(FieldError::invalid_phone(field))
                }
            }
        },
        RuleKind::Range { min, max } => match value.and_then(FieldValue::as_number) {
            Some(n) if n >= *min && n <= *max => Ok(()),
            _ => Err(FieldError::out_of_range(field, *min, *max)),
        },
    }
}

/// Runs every rule of a field, stopping at the first failure.
pub fn validate_all(
    field: &str,
    rules: &[RuleKind],
    value: Option<&FieldValue>,
) -> Result<(), FieldError> {
    rules.iter().try_for_each(|rule| validate(field, rule, value))
}

/// Non-blank textual content of a value. Numbers are rendered so a phone
/// typed into a numeric input is still checked.
fn present_text(value: Option<&FieldValue>) -> Option<std::borrow::Cow<'_, str>> {
    match value? {
        FieldValue::Text(s) if s.trim().is_empty() => None,
        FieldValue::Text(s) => Some(std::borrow::Cow::Borrowed(s.as_str())),
        v @ FieldValue::Number(_) => Some(std::borrow::Cow::Owned(v.to_string())),
        FieldValue::Selection(_) => None,
    }
}

/// Progressive Brazilian phone mask for display.
///
/// Keeps at most 11 digits: `(11) 91234-5678` for mobiles, `(11) 1234-5678`
/// for landlines, and partial masks while the number is being typed.
pub fn format_phone_br(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(11).collect();
    let n = digits.len();

    match n {
        0 => String::new(),
        1..=2 => format!("({}", digits),
        3..=6 => format!("({}) {}", &digits[..2], &digits[2..]),
        7..=10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}
