//! Field values collected by the intake wizard.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Flat map of field name to answer. A missing key means "no value".
pub type FieldValues = BTreeMap<String, FieldValue>;

/// A single answer in the intake form.
///
/// Serialized untagged so a record looks like the plain JSON object a form
/// would post: strings, numbers and arrays of selected options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free text or a single choice.
    Text(String),
    /// Numeric answer such as a 0-10 rating.
    Number(f64),
    /// Options chosen in a multi-select field.
    Selection(BTreeSet<String>),
}

impl FieldValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Creates a selection from any list of options.
    pub fn selection<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::Selection(options.into_iter().map(Into::into).collect())
    }

    /// Creates an empty selection.
    pub fn empty_selection() -> Self {
        FieldValue::Selection(BTreeSet::new())
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content. Numeric text ("7", " 8.5 ") also counts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            FieldValue::Selection(_) => None,
        }
    }

    /// Returns the selected options, if this is a selection.
    pub fn as_selection(&self) -> Option<&BTreeSet<String>> {
        match self {
            FieldValue::Selection(set) => Some(set),
            _ => None,
        }
    }

    /// Converts loosely-typed JSON into a field value.
    ///
    /// `null` means "no answer". Booleans and objects become text, arrays
    /// become selections with non-string items rendered as text.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Null => None,
            Value::String(s) => Some(FieldValue::Text(s)),
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
            Value::Array(items) => Some(FieldValue::Selection(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Null => None,
                        Value::String(s) => Some(s),
                        other => Some(other.to_string()),
                    })
                    .collect(),
            )),
            other @ Value::Object(_) => Some(FieldValue::Text(other.to_string())),
        }
    }

    /// Coerces a value into a selection, for multi-select fields fed from
    /// sources that send a single raw string. Blank text yields an empty set.
    pub fn into_selection(self) -> Self {
        match self {
            FieldValue::Selection(_) => self,
            FieldValue::Text(s) if s.trim().is_empty() => FieldValue::empty_selection(),
            FieldValue::Text(s) => FieldValue::selection([s]),
            number @ FieldValue::Number(_) => FieldValue::selection([number.to_string()]),
        }
    }

    /// True for whitespace-only text and empty selections.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Selection(set) => set.is_empty(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Selection(set) => {
                let joined: Vec<&str> = set.iter().map(String::as_str).collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_plain_json_shapes() {
        let values: FieldValues = serde_json::from_str(
            r#"{"companyName": "Acme", "serviceRating": 8, "goals": ["Vender mais"]}"#,
        )
        .unwrap();

        assert_eq!(values["companyName"], FieldValue::text("Acme"));
        assert_eq!(values["serviceRating"], FieldValue::Number(8.0));
        assert_eq!(values["goals"], FieldValue::selection(["Vender mais"]));
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&FieldValue::selection(["b", "a"])).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
        assert_eq!(serde_json::to_string(&FieldValue::text("x")).unwrap(), "\"x\"");
    }

    #[test]
    fn numeric_text_reads_as_number() {
        assert_eq!(FieldValue::text(" 7 ").as_number(), Some(7.0));
        assert_eq!(FieldValue::text("sete").as_number(), None);
        assert_eq!(FieldValue::text("NaN").as_number(), None);
        assert_eq!(FieldValue::empty_selection().as_number(), None);
    }

    #[test]
    fn from_json_treats_null_as_missing() {
        use serde_json::json;
        assert_eq!(FieldValue::from_json(json!(null)), None);
        assert_eq!(FieldValue::from_json(json!(true)), Some(FieldValue::text("true")));
        assert_eq!(
            FieldValue::from_json(json!(["Pix", null, 3])),
            Some(FieldValue::selection(["Pix", "3"]))
        );
    }

    #[test]
    fn single_string_becomes_one_element_selection() {
        assert_eq!(FieldValue::text("Pix").into_selection(), FieldValue::selection(["Pix"]));
        assert_eq!(FieldValue::text(" ").into_selection(), FieldValue::empty_selection());
        let already = FieldValue::selection(["a", "b"]);
        assert_eq!(already.clone().into_selection(), already);
    }

    #[test]
    fn blankness() {
        assert!(FieldValue::text("   ").is_blank());
        assert!(FieldValue::empty_selection().is_blank());
        assert!(!FieldValue::Number(0.0).is_blank());
        assert!(!FieldValue::text("a").is_blank());
    }

    #[test]
    fn display_renders_human_values() {
        assert_eq!(FieldValue::Number(8.0).to_string(), "8");
        assert_eq!(FieldValue::Number(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::selection(["Pix", "Boleto"]).to_string(), "Boleto, Pix");
    }
}
