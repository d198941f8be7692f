//! Wizard Engine - Step-by-step state machine over the intake answers.
//!
//! The engine owns the answers of one form session. It validates a step
//! only when asked to (on advance, or explicitly), records which steps
//! passed their latest validation, and limits free navigation to steps the
//! user has already reached.
//!
//! ```ignore
//! let mut wizard = WizardEngine::new(IntakeKind::SwotAnalysis);
//! wizard.set_field("name", "Ana");
//! match wizard.advance() {
//!     AdvanceOutcome::Blocked { missing } => show_errors(&missing),
//!     AdvanceOutcome::Advanced { to } => render_step(to),
//!     AdvanceOutcome::AtTerminal => {}
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use super::catalog;
use super::errors::{FieldError, WizardError};
use super::field_value::{FieldValue, FieldValues};
use super::record::{IntakeKind, IntakeRecord};
use super::step::{FieldShape, StepDefinition, StepSchema};
use super::validator::validate_all;

/// Banner shown when an advance is blocked by invalid fields.
pub const INCOMPLETE_STEP_MESSAGE: &str =
    "Por favor, preencha todos os campos obrigatórios em destaque antes de prosseguir.";

/// Result of trying to move to the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The current step was valid and the wizard moved forward.
    Advanced { to: usize },
    /// The current step has invalid fields; nothing moved.
    Blocked { missing: Vec<String> },
    /// The current step is the terminal one; there is nowhere to go.
    AtTerminal,
}

impl AdvanceOutcome {
    /// The aggregate banner message, present only when blocked.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            AdvanceOutcome::Blocked { .. } => Some(INCOMPLETE_STEP_MESSAGE),
            _ => None,
        }
    }
}

/// State machine for one intake form session.
#[derive(Debug, Clone)]
pub struct WizardEngine {
    kind: IntakeKind,
    schema: StepSchema,
    current_step: usize,
    values: FieldValues,
    field_errors: BTreeMap<String, FieldError>,
    completed_steps: BTreeSet<usize>,
}

impl WizardEngine {
    /// Creates a wizard over the built-in catalog for `kind`.
    pub fn new(kind: IntakeKind) -> Self {
        Self::with_schema(kind, catalog::schema_for(kind))
    }

    /// Creates a wizard over a custom schema.
    ///
    /// Every declared field is seeded with its initial value so that the
    /// values map always covers the whole schema.
    pub fn with_schema(kind: IntakeKind, schema: StepSchema) -> Self {
        let values = schema
            .fields()
            .map(|f| (f.name.clone(), f.initial_value()))
            .collect();

        Self {
            kind,
            schema,
            current_step: 0,
            values,
            field_errors: BTreeMap::new(),
            completed_steps: BTreeSet::new(),
        }
    }

    // === Mutations ===

    /// Stores a value and clears any error recorded for the field.
    ///
    /// Values for multi-select fields are coerced into selections.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let mut value = value.into();
        if self.is_multi_select(&name) {
            value = value.into_selection();
        }
        self.field_errors.remove(&name);
        self.values.insert(name, value);
    }

    /// Removes a value entirely. A cleared scale fails its range rule.
    pub fn clear_field(&mut self, name: &str) {
        self.values.remove(name);
        self.field_errors.remove(name);
    }

    /// Adds `option` to a multi-select field, or removes it if present.
    pub fn toggle_option(&mut self, name: &str, option: &str) {
        let current = self
            .values
            .remove(name)
            .map(FieldValue::into_selection)
            .and_then(|v| v.as_selection().cloned())
            .unwrap_or_default();

        let mut next = current;
        if !next.remove(option) {
            next.insert(option.to_string());
        }

        self.values.insert(name.to_string(), FieldValue::Selection(next));
        self.field_errors.remove(name);
    }

    /// Merges externally supplied values, such as demo data or the name and
    /// e-mail of a signed-in user.
    pub fn prefill<I, K>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: Into<String>,
    {
        for (name, value) in values {
            self.set_field(name, value);
        }
    }

    // === Validation ===

    /// Validates every effective field of a step.
    ///
    /// Replaces the recorded field errors with exactly the failures found
    /// and updates the completion of the step. Returns false without touching
    /// any state when `step_index` is out of range.
    pub fn validate_step(&mut self, step_index: usize) -> bool {
        let Some(step) = self.schema.step(step_index) else {
            return false;
        };

        let errors = Self::failures(step, &self.values);
        let valid = errors.is_empty();

        self.field_errors = errors.into_iter().map(|e| (e.field.clone(), e)).collect();
        if valid {
            self.completed_steps.insert(step_index);
        } else {
            self.completed_steps.remove(&step_index);
        }
        valid
    }

    fn failures(step: &StepDefinition, values: &FieldValues) -> Vec<FieldError> {
        step.effective_fields(values)
            .filter_map(|f| validate_all(&f.name, &f.rules, values.get(&f.name)).err())
            .collect()
    }

    // === Navigation ===

    /// Validates the current step and moves forward if it passes.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let step = self.current_step;
        if !self.validate_step(step) {
            return AdvanceOutcome::Blocked {
                missing: self.failing_fields_in_order(step),
            };
        }

        if self.is_at_terminal() {
            return AdvanceOutcome::AtTerminal;
        }

        self.current_step += 1;
        AdvanceOutcome::Advanced {
            to: self.current_step,
        }
    }

    /// Moves back one step. Never validates.
    pub fn retreat(&mut self) -> usize {
        self.current_step = self.current_step.saturating_sub(1);
        self.current_step
    }

    /// Jumps to any step already reached.
    ///
    /// Allowed for indices up to the furthest of the completed steps and the
    /// current step. Returns false and changes nothing otherwise.
    pub fn jump_to(&mut self, step_index: usize) -> bool {
        if step_index >= self.schema.len() || step_index > self.furthest_reachable() {
            return false;
        }
        self.current_step = step_index;
        true
    }

    fn furthest_reachable(&self) -> usize {
        self.completed_steps
            .iter()
            .next_back()
            .copied()
            .map_or(self.current_step, |max| max.max(self.current_step))
    }

    // === Submission ===

    /// Freezes the answers into an [`IntakeRecord`].
    ///
    /// Only possible from the terminal step. Every step is validated again in
    /// order; the first invalid one becomes the current step and is reported.
    pub fn submit(&mut self) -> Result<IntakeRecord, WizardError> {
        if !self.is_at_terminal() {
            return Err(WizardError::NotAtTerminalStep);
        }

        for index in 0..self.schema.len() {
            if !self.validate_step(index) {
                self.current_step = index;
                return Err(WizardError::Incomplete {
                    step: index,
                    fields: self.failing_fields_in_order(index),
                });
            }
        }

        Ok(IntakeRecord::new(self.kind, self.values.clone()))
    }

    fn failing_fields_in_order(&self, step_index: usize) -> Vec<String> {
        self.schema
            .step(step_index)
            .map(|step| {
                step.fields
                    .iter()
                    .filter(|f| self.field_errors.contains_key(&f.name))
                    .map(|f| f.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_multi_select(&self, name: &str) -> bool {
        self.schema
            .field(name)
            .map(|f| f.shape == FieldShape::MultiSelect)
            .unwrap_or(false)
    }

    // === Accessors ===

    pub fn kind(&self) -> IntakeKind {
        self.kind
    }

    pub fn schema(&self) -> &StepSchema {
        &self.schema
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.schema.len()
    }

    pub fn current_definition(&self) -> &StepDefinition {
        &self.schema.steps()[self.current_step]
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn field_errors(&self) -> &BTreeMap<String, FieldError> {
        &self.field_errors
    }

    pub fn has_error(&self, name: &str) -> bool {
        self.field_errors.contains_key(name)
    }

    pub fn completed_steps(&self) -> &BTreeSet<usize> {
        &self.completed_steps
    }

    pub fn is_completed(&self, step_index: usize) -> bool {
        self.completed_steps.contains(&step_index)
    }

    pub fn is_at_terminal(&self) -> bool {
        self.current_definition().is_terminal
    }

    /// Required fields of a step that apply for the current values.
    pub fn effective_required_fields(&self, step_index: usize) -> Vec<&str> {
        self.schema
            .step(step_index)
            .map(|step| step.effective_required_fields(&self.values))
            .unwrap_or_default()
    }

    /// Position for the step indicator, e.g. "3 de 13".
    pub fn progress(&self) -> String {
        format!("{} de {}", self.current_step + 1, self.schema.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::errors::FieldErrorKind;
    use crate::domain::intake::step::FieldSpec;
    use crate::domain::intake::validator::RuleKind;
    use proptest::prelude::*;

    fn small_schema() -> StepSchema {
        StepSchema::new(vec![
            StepDefinition::new(
                0,
                "Contato",
                vec![
                    FieldSpec::text("name", "Nome").required(),
                    FieldSpec::text("email", "E-mail").required().with_rule(RuleKind::Email),
                ],
            ),
            StepDefinition::new(
                1,
                "Produto",
                vec![
                    FieldSpec::multi_select("paymentMethods", "Pagamento").required(),
                    FieldSpec::text("hasWarranty", "Garantia").with_default("sim"),
                    FieldSpec::text("warrantyDetails", "Detalhes")
                        .required()
                        .visible_when("hasWarranty", "sim"),
                ],
            ),
            StepDefinition::new(
                2,
                "Vendas",
                vec![FieldSpec::scale("serviceRating", "Nota", 0.0, 10.0)],
            ),
            StepDefinition::terminal(3, "Finalizar", vec![]),
        ])
        .unwrap()
    }

    fn wizard() -> WizardEngine {
        WizardEngine::with_schema(IntakeKind::BusinessBriefing, small_schema())
    }

    fn fill_step_zero(w: &mut WizardEngine) {
        w.set_field("name", "Ana");
        w.set_field("email", "ana@acme.com");
    }

    fn fill_step_one(w: &mut WizardEngine) {
        w.toggle_option("paymentMethods", "Pix");
        w.set_field("warrantyDetails", "12 meses");
    }

    #[test]
    fn construction_seeds_every_field() {
        let w = wizard();
        assert_eq!(w.value("name"), Some(&FieldValue::text("")));
        assert_eq!(w.value("paymentMethods"), Some(&FieldValue::empty_selection()));
        assert_eq!(w.value("hasWarranty"), Some(&FieldValue::text("sim")));
        assert_eq!(w.value("serviceRating"), Some(&FieldValue::Number(5.0)));
        assert_eq!(w.current_step(), 0);
        assert_eq!(w.progress(), "1 de 4");
    }

    #[test]
    fn blocked_advance_reports_missing_fields_in_order() {
        let mut w = wizard();
        let outcome = w.advance();

        assert_eq!(
            outcome,
            AdvanceOutcome::Blocked {
                missing: vec!["name".into(), "email".into()]
            }
        );
        assert_eq!(outcome.message(), Some(INCOMPLETE_STEP_MESSAGE));
        assert_eq!(w.current_step(), 0);
        assert!(w.has_error("name"));
        assert!(w.has_error("email"));
    }

    #[test]
    fn set_field_clears_only_that_error() {
        let mut w = wizard();
        w.advance();
        w.set_field("name", "Ana");
        assert!(!w.has_error("name"));
        assert!(w.has_error("email"));
    }

    #[test]
    fn errors_are_replaced_not_merged() {
        let mut w = wizard();
        w.advance();
        w.set_field("name", "Ana");
        w.set_field("email", "invalido");
        w.validate_step(0);

        assert_eq!(w.field_errors().len(), 1);
        assert_eq!(w.field_errors()["email"].kind, FieldErrorKind::InvalidEmail);
    }

    #[test]
    fn valid_step_advances_and_completes() {
        let mut w = wizard();
        fill_step_zero(&mut w);

        assert_eq!(w.advance(), AdvanceOutcome::Advanced { to: 1 });
        assert!(w.is_completed(0));
        assert!(w.field_errors().is_empty());
        assert_eq!(w.progress(), "2 de 4");
    }

    #[test]
    fn failed_revalidation_removes_completion() {
        let mut w = wizard();
        fill_step_zero(&mut w);
        w.advance();
        w.set_field("name", "");

        assert!(!w.validate_step(0));
        assert!(!w.is_completed(0));
    }

    #[test]
    fn validate_out_of_range_changes_nothing() {
        let mut w = wizard();
        w.advance();
        let errors_before = w.field_errors().clone();

        assert!(!w.validate_step(99));
        assert_eq!(w.field_errors(), &errors_before);
        assert!(w.completed_steps().is_empty());
    }

    #[test]
    fn conditional_field_only_required_when_shown() {
        let mut w = wizard();
        fill_step_zero(&mut w);
        w.advance();
        w.toggle_option("paymentMethods", "Pix");

        assert!(!w.validate_step(1));
        assert!(w.has_error("warrantyDetails"));
        assert_eq!(w.effective_required_fields(1), vec!["paymentMethods", "warrantyDetails"]);

        w.set_field("hasWarranty", "não");
        assert!(w.validate_step(1));
        assert_eq!(w.effective_required_fields(1), vec!["paymentMethods"]);
    }

    #[test]
    fn toggle_option_adds_and_removes() {
        let mut w = wizard();
        w.toggle_option("paymentMethods", "Pix");
        w.toggle_option("paymentMethods", "Boleto");
        w.toggle_option("paymentMethods", "Pix");
        assert_eq!(w.value("paymentMethods"), Some(&FieldValue::selection(["Boleto"])));
    }

    #[test]
    fn multi_select_accepts_single_raw_string() {
        let mut w = wizard();
        w.set_field("paymentMethods", "Pix");
        assert_eq!(w.value("paymentMethods"), Some(&FieldValue::selection(["Pix"])));
    }

    #[test]
    fn scale_is_valid_until_cleared() {
        let mut w = wizard();
        assert!(w.validate_step(2));

        w.clear_field("serviceRating");
        assert!(!w.validate_step(2));
        assert_eq!(
            w.field_errors()["serviceRating"].kind,
            FieldErrorKind::OutOfRange { min: 0.0, max: 10.0 }
        );
    }

    #[test]
    fn retreat_floors_at_zero_without_validating() {
        let mut w = wizard();
        fill_step_zero(&mut w);
        w.advance();
        w.set_field("name", "");

        assert_eq!(w.retreat(), 0);
        assert_eq!(w.retreat(), 0);
        assert!(w.is_completed(0));
    }

    #[test]
    fn jump_to_only_reaches_visited_steps() {
        let mut w = wizard();
        fill_step_zero(&mut w);
        w.advance();
        fill_step_one(&mut w);
        w.advance();
        assert_eq!(w.current_step(), 2);

        assert!(w.jump_to(2));
        assert!(!w.jump_to(3));
        assert!(!w.jump_to(10));

        // From 0 the bound falls back to the highest completed step.
        assert!(w.jump_to(0));
        assert!(!w.jump_to(2));
        assert!(w.jump_to(1));
        assert_eq!(w.current_step(), 1);
    }

    #[test]
    fn submit_requires_terminal_step() {
        let mut w = wizard();
        assert_eq!(w.submit(), Err(WizardError::NotAtTerminalStep));
    }

    #[test]
    fn submit_produces_frozen_record() {
        let mut w = wizard();
        fill_step_zero(&mut w);
        w.advance();
        fill_step_one(&mut w);
        w.advance();
        w.advance();
        assert!(w.is_at_terminal());

        let record = w.submit().unwrap();
        assert_eq!(record.kind(), IntakeKind::BusinessBriefing);
        assert_eq!(record.values(), w.values());
        assert_eq!(w.advance(), AdvanceOutcome::AtTerminal);
    }

    #[test]
    fn submit_moves_to_first_invalid_step() {
        let mut w = wizard();
        fill_step_zero(&mut w);
        w.advance();
        fill_step_one(&mut w);
        w.advance();
        w.advance();
        w.clear_field("name");
        w.toggle_option("paymentMethods", "Pix");

        let err = w.submit().unwrap_err();
        assert_eq!(
            err,
            WizardError::Incomplete {
                step: 0,
                fields: vec!["name".into()]
            }
        );
        assert_eq!(w.current_step(), 0);
    }

    #[test]
    fn prefill_merges_and_clears_errors() {
        let mut w = wizard();
        w.advance();
        w.prefill([
            ("name", FieldValue::text("Ana")),
            ("email", FieldValue::text("ana@acme.com")),
        ]);
        assert!(w.field_errors().is_empty());
        assert_eq!(w.advance(), AdvanceOutcome::Advanced { to: 1 });
    }

    #[test]
    fn builtin_briefing_blocks_on_empty_first_step() {
        let mut w = WizardEngine::new(IntakeKind::BusinessBriefing);
        match w.advance() {
            AdvanceOutcome::Blocked { missing } => assert_eq!(missing.len(), 6),
            other => panic!("expected blocked, got {:?}", other),
        }
        assert_eq!(w.progress(), "1 de 13");
    }

    fn text_value() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            Just(Some("   ".to_string())),
            "[a-z]{1,8}".prop_map(Some),
            "[a-z]{1,6}@[a-z]{1,6}\\.[a-z]{2,3}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn validate_step_reports_exactly_failing_fields(
            name in text_value(),
            email in text_value(),
        ) {
            let mut w = wizard();
            match &name {
                Some(v) => w.set_field("name", v.as_str()),
                None => w.clear_field("name"),
            }
            match &email {
                Some(v) => w.set_field("email", v.as_str()),
                None => w.clear_field("email"),
            }

            let name_ok = name.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false);
            let email_ok = email
                .as_deref()
                .map(|v| !v.trim().is_empty() && v.contains('@') && v.contains('.'))
                .unwrap_or(false);

            let valid = w.validate_step(0);
            prop_assert_eq!(valid, name_ok && email_ok);
            prop_assert_eq!(w.has_error("name"), !name_ok);
            prop_assert_eq!(w.has_error("email"), !email_ok);
            prop_assert_eq!(w.field_errors().len(), usize::from(!name_ok) + usize::from(!email_ok));
        }

        #[test]
        fn blocked_advance_is_idempotent(attempts in 1usize..6) {
            let mut w = wizard();
            let first = w.advance();
            for _ in 0..attempts {
                prop_assert_eq!(w.advance(), first.clone());
                prop_assert_eq!(w.current_step(), 0);
            }
        }

        #[test]
        fn jump_to_respects_furthest_reached(target in 0usize..8, reached in 0usize..3) {
            let mut w = wizard();
            if reached >= 1 {
                fill_step_zero(&mut w);
                w.advance();
            }
            if reached >= 2 {
                fill_step_one(&mut w);
                w.advance();
            }
            let furthest = w.current_step();
            let before = w.current_step();

            let moved = w.jump_to(target);
            prop_assert_eq!(moved, target <= furthest && target < w.step_count());
            if moved {
                prop_assert_eq!(w.current_step(), target);
            } else {
                prop_assert_eq!(w.current_step(), before);
            }
        }

        #[test]
        fn empty_required_selection_always_fails(options in proptest::collection::vec("[A-Z][a-z]{2,6}", 0..4)) {
            let mut w = wizard();
            fill_step_zero(&mut w);
            w.advance();
            w.set_field("warrantyDetails", "12 meses");
            for option in &options {
                w.toggle_option("paymentMethods", option);
                w.toggle_option("paymentMethods", option);
            }

            prop_assert!(!w.validate_step(1));
            prop_assert_eq!(w.field_errors()["paymentMethods"].kind, FieldErrorKind::Required);
        }
    }
}
