//! Step Schema - Declarative description of the wizard pages.
//!
//! A schema is an ordered list of [`StepDefinition`]s. Each step declares its
//! fields together with their validation rules and optional display
//! precondition. The engine never hard-codes field names; everything it
//! validates comes from here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::errors::SchemaError;
use super::field_value::{FieldValue, FieldValues};
use super::validator::RuleKind;

/// Shows a field only while another field holds a given text value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayCondition {
    pub field: String,
    pub equals: String,
}

impl DisplayCondition {
    pub fn new(field: impl Into<String>, equals: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            equals: equals.into(),
        }
    }

    /// True when the controlling field currently holds the expected text.
    pub fn holds(&self, values: &FieldValues) -> bool {
        values
            .get(&self.field)
            .and_then(FieldValue::as_text)
            .map(|v| v == self.equals)
            .unwrap_or(false)
    }
}

/// Whether a field holds text or a set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldShape {
    Text,
    MultiSelect,
}

/// One field within a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Portuguese label used in summaries.
    pub label: String,
    pub shape: FieldShape,
    pub rules: Vec<RuleKind>,
    pub visible_when: Option<DisplayCondition>,
    pub default: Option<FieldValue>,
}

impl FieldSpec {
    /// Creates an optional free-text field.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            shape: FieldShape::Text,
            rules: Vec::new(),
            visible_when: None,
            default: None,
        }
    }

    /// Creates a multi-select field.
    pub fn multi_select(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            shape: FieldShape::MultiSelect,
            ..Self::text(name, label)
        }
    }

    /// Creates a numeric scale field. The value must stay inside `[min, max]`.
    pub fn scale(name: impl Into<String>, label: impl Into<String>, min: f64, max: f64) -> Self {
        Self::text(name, label).with_rule(RuleKind::Range { min, max })
    }

    pub fn with_rule(mut self, rule: RuleKind) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn required(self) -> Self {
        self.with_rule(RuleKind::Required)
    }

    pub fn visible_when(mut self, field: impl Into<String>, equals: impl Into<String>) -> Self {
        self.visible_when = Some(DisplayCondition::new(field, equals));
        self
    }

    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// True if any rule rejects a missing value.
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(RuleKind::demands_value)
    }

    /// True if the field applies for the current values.
    pub fn is_effective(&self, values: &FieldValues) -> bool {
        self.visible_when
            .as_ref()
            .map(|cond| cond.holds(values))
            .unwrap_or(true)
    }

    /// The value the wizard seeds this field with.
    ///
    /// Explicit defaults win; scales start at their midpoint, multi-selects
    /// empty, everything else as empty text.
    pub fn initial_value(&self) -> FieldValue {
        if let Some(default) = &self.default {
            return default.clone();
        }
        let range = self.rules.iter().find_map(|rule| match rule {
            RuleKind::Range { min, max } => Some((*min, *max)),
            _ => None,
        });
        match (range, self.shape) {
            (Some((min, max)), _) => FieldValue::Number((min + max) / 2.0),
            (None, FieldShape::MultiSelect) => FieldValue::empty_selection(),
            (None, FieldShape::Text) => FieldValue::text(""),
        }
    }
}

/// One page of the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub index: usize,
    pub title: String,
    pub fields: Vec<FieldSpec>,
    pub is_terminal: bool,
}

impl StepDefinition {
    pub fn new(index: usize, title: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            index,
            title: title.into(),
            fields,
            is_terminal: false,
        }
    }

    pub fn terminal(index: usize, title: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            is_terminal: true,
            ..Self::new(index, title, fields)
        }
    }

    /// Names of every declared required field, ignoring display conditions.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Fields whose display precondition holds for `values`.
    pub fn effective_fields<'a>(
        &'a self,
        values: &'a FieldValues,
    ) -> impl Iterator<Item = &'a FieldSpec> + 'a {
        self.fields.iter().filter(move |f| f.is_effective(values))
    }

    /// Required fields that apply for `values`.
    pub fn effective_required_fields<'a>(&'a self, values: &'a FieldValues) -> Vec<&'a str> {
        self.effective_fields(values)
            .filter(|f| f.is_required())
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// A validated, ordered list of steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSchema {
    steps: Vec<StepDefinition>,
}

impl StepSchema {
    /// Builds a schema, checking indices, the terminal step and field names.
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self, SchemaError> {
        if steps.is_empty() {
            return Err(SchemaError::Empty);
        }

        for (position, step) in steps.iter().enumerate() {
            if step.index != position {
                return Err(SchemaError::NonContiguousIndex {
                    position,
                    index: step.index,
                });
            }
        }

        let terminals: Vec<usize> = steps
            .iter()
            .filter(|s| s.is_terminal)
            .map(|s| s.index)
            .collect();
        match terminals.as_slice() {
            [index] if *index == steps.len() - 1 => {}
            [index] => return Err(SchemaError::TerminalNotLast { index: *index }),
            _ => {
                return Err(SchemaError::TerminalCount {
                    count: terminals.len(),
                })
            }
        }

        let mut seen = HashSet::new();
        for field in steps.iter().flat_map(|s| s.fields.iter()) {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        for field in steps.iter().flat_map(|s| s.fields.iter()) {
            if let Some(cond) = &field.visible_when {
                if !seen.contains(cond.field.as_str()) {
                    return Err(SchemaError::UnknownConditionField {
                        field: field.name.clone(),
                        depends_on: cond.field.clone(),
                    });
                }
            }
        }

        Ok(Self { steps })
    }

    /// Wraps the built-in catalogs, which are covered by their own tests.
    pub(crate) fn from_catalog(steps: Vec<StepDefinition>) -> Self {
        debug_assert!(Self::new(steps.clone()).is_ok(), "built-in catalog is invalid");
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Every declared field, in step order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }

    /// Looks up a field declaration by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().find(|f| f.name == name)
    }

    /// Index of the terminal (last) step.
    pub fn terminal_index(&self) -> usize {
        self.steps.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_steps() -> Vec<StepDefinition> {
        vec![
            StepDefinition::new(0, "Empresa", vec![FieldSpec::text("companyName", "Empresa").required()]),
            StepDefinition::terminal(1, "Finalizar", vec![]),
        ]
    }

    #[test]
    fn accepts_well_formed_schema() {
        let schema = StepSchema::new(two_steps()).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.terminal_index(), 1);
        assert!(schema.field("companyName").is_some());
    }

    #[test]
    fn rejects_empty_schema() {
        assert_eq!(StepSchema::new(vec![]), Err(SchemaError::Empty));
    }

    #[test]
    fn rejects_gap_in_indices() {
        let mut steps = two_steps();
        steps[1].index = 2;
        assert_eq!(
            StepSchema::new(steps),
            Err(SchemaError::NonContiguousIndex { position: 1, index: 2 })
        );
    }

    #[test]
    fn rejects_missing_or_misplaced_terminal() {
        let mut steps = two_steps();
        steps[1].is_terminal = false;
        assert_eq!(StepSchema::new(steps), Err(SchemaError::TerminalCount { count: 0 }));

        let mut steps = two_steps();
        steps[0].is_terminal = true;
        assert_eq!(StepSchema::new(steps), Err(SchemaError::TerminalCount { count: 2 }));

        let mut steps = two_steps();
        steps[0].is_terminal = true;
        steps[1].is_terminal = false;
        assert_eq!(StepSchema::new(steps), Err(SchemaError::TerminalNotLast { index: 0 }));
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let mut steps = two_steps();
        steps[1].fields.push(FieldSpec::text("companyName", "Outra"));
        assert_eq!(
            StepSchema::new(steps),
            Err(SchemaError::DuplicateField("companyName".into()))
        );
    }

    #[test]
    fn rejects_condition_on_unknown_field() {
        let mut steps = two_steps();
        steps[0]
            .fields
            .push(FieldSpec::text("details", "Detalhes").visible_when("ghost", "sim"));
        assert!(matches!(
            StepSchema::new(steps),
            Err(SchemaError::UnknownConditionField { .. })
        ));
    }

    #[test]
    fn effective_required_fields_follow_display_condition() {
        let step = StepDefinition::new(
            0,
            "Produto",
            vec![
                FieldSpec::text("hasWarranty", "Garantia").with_default("sim"),
                FieldSpec::text("warrantyDetails", "Detalhes")
                    .required()
                    .visible_when("hasWarranty", "sim"),
            ],
        );
        let mut values = FieldValues::new();
        values.insert("hasWarranty".into(), FieldValue::text("sim"));
        assert_eq!(step.effective_required_fields(&values), vec!["warrantyDetails"]);

        values.insert("hasWarranty".into(), FieldValue::text("não"));
        assert!(step.effective_required_fields(&values).is_empty());
        assert_eq!(step.required_fields(), vec!["warrantyDetails"]);
    }

    #[test]
    fn initial_values() {
        assert_eq!(FieldSpec::scale("r", "Nota", 0.0, 10.0).initial_value(), FieldValue::Number(5.0));
        assert_eq!(
            FieldSpec::scale("r", "Nota", 1.0, 5.0).with_default(2).initial_value(),
            FieldValue::Number(2.0)
        );
        assert_eq!(FieldSpec::multi_select("g", "Metas").initial_value(), FieldValue::empty_selection());
        assert_eq!(FieldSpec::text("t", "Texto").initial_value(), FieldValue::text(""));
    }
}
