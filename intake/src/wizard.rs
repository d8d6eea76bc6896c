//! The step-wizard state machine.

use tracing::{debug, info, warn};

use crate::{
    AnswerSet, AnswerValue, DefinitionError, FieldId, FieldKind, FormDefinition, IntakeForm,
    StepDefinition, SubmitReceipt, Submitter, ValidationErrors, check_field, is_step_complete,
    validate_all,
};

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Showing the 1-based step `i`, always within `1..=N`.
    Step(usize),

    /// The answers were delivered. Terminal.
    Submitted,
}

/// Error type for answer edits.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Unknown field: {0}")]
    UnknownField(FieldId),

    #[error("Field '{field}' expects a {expected} value, got {actual}")]
    TypeMismatch {
        field: FieldId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("'{option}' is not an option of field '{field}'")]
    UnknownOption { field: FieldId, option: String },

    #[error("The form has already been submitted")]
    Closed,
}

/// A delivered answer set together with the endpoint's receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub answers: AnswerSet,
    pub receipt: SubmitReceipt,
}

/// Result of a submit action.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Not on the final step; nothing happened.
    NotReady,

    /// The wizard already reached `Submitted`; nothing happened.
    AlreadySubmitted,

    /// Full validation failed for this many fields; see `WizardController::errors`.
    Invalid(usize),

    /// The submitter failed; the notice shown to the user.
    Failed(String),

    /// The answers were delivered and the wizard is now `Submitted`.
    Submitted(Submission),
}

/// Holds the current step and the answers of one intake session.
///
/// The form definition is fixed at construction. The answer set starts from the
/// form's declared defaults, is mutated only through the edit methods, and is
/// moved out to the caller on a successful submission.
#[derive(Debug, Clone)]
pub struct WizardController {
    form: FormDefinition,
    answers: AnswerSet,
    state: WizardState,
    errors: ValidationErrors,
    notice: Option<String>,
}

impl WizardController {
    /// Start a session at step 1 with the form's declared defaults.
    pub fn new(form: FormDefinition) -> Self {
        let answers = form.initial_answers();
        Self {
            form,
            answers,
            state: WizardState::Step(1),
            errors: ValidationErrors::new(),
            notice: None,
        }
    }

    /// Start a session for a form variant.
    pub fn for_form(form: &impl IntakeForm) -> Result<Self, DefinitionError> {
        form.form().map(Self::new)
    }

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    /// The in-progress answers. Empty once submitted.
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// The current 1-based step, or `None` once submitted.
    pub fn current_step(&self) -> Option<usize> {
        match self.state {
            WizardState::Step(i) => Some(i),
            WizardState::Submitted => None,
        }
    }

    /// The definition of the current step, or `None` once submitted.
    pub fn current_step_definition(&self) -> Option<&StepDefinition> {
        self.current_step().and_then(|i| self.form.step(i))
    }

    pub fn step_count(&self) -> usize {
        self.form.step_count()
    }

    /// Whether the current step is the last one (the one that submits).
    pub fn is_final_step(&self) -> bool {
        self.current_step() == Some(self.step_count())
    }

    pub fn is_submitted(&self) -> bool {
        self.state == WizardState::Submitted
    }

    /// `(current, total)` for a progress indicator.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.step_count();
        (self.current_step().unwrap_or(total), total)
    }

    /// Inline error messages from the last submit attempt or field touch.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// The failure notice of the last submit attempt, until dismissed.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // === Edits ===

    /// Set a field's answer. The value must match the field's kind.
    pub fn set(
        &mut self,
        field: impl Into<FieldId>,
        value: impl Into<AnswerValue>,
    ) -> Result<(), WizardError> {
        let field = field.into();
        let value = value.into();
        let kind = self.editable_kind(&field)?;
        if !kind.accepts(&value) {
            return Err(WizardError::TypeMismatch {
                expected: kind.value_type(),
                actual: value.type_name(),
                field,
            });
        }
        debug!(field = %field, "answer updated");
        self.answers.insert(field, value);
        Ok(())
    }

    /// Remove a field's answer, restoring its declared default if it has one.
    pub fn clear(&mut self, field: impl Into<FieldId>) -> Result<(), WizardError> {
        let field = field.into();
        self.editable_kind(&field)?;
        match self.form.field(&field).and_then(|f| f.initial_value()) {
            Some(initial) => self.answers.insert(field, initial),
            None => {
                self.answers.remove(&field);
            }
        }
        Ok(())
    }

    /// Select or deselect an option.
    ///
    /// Multi-choice fields toggle membership; single-choice fields select the
    /// option. Returns whether the option is selected afterwards.
    pub fn toggle_choice(
        &mut self,
        field: impl Into<FieldId>,
        option: &str,
    ) -> Result<bool, WizardError> {
        let field = field.into();
        let kind = self.editable_kind(&field)?;
        let Some(options) = kind.options() else {
            return Err(WizardError::TypeMismatch {
                expected: kind.value_type(),
                actual: "Choice",
                field,
            });
        };
        if !options.iter().any(|o| o.value == option) {
            return Err(WizardError::UnknownOption {
                field,
                option: option.to_string(),
            });
        }

        if matches!(kind, FieldKind::Choice(_)) {
            self.answers.insert(field, AnswerValue::Choice(option.to_string()));
            return Ok(true);
        }

        let mut selected = self
            .answers
            .get(&field)
            .and_then(AnswerValue::as_choices)
            .cloned()
            .unwrap_or_default();
        let now_selected = if selected.remove(option) {
            false
        } else {
            selected.insert(option.to_string());
            true
        };
        self.answers.insert(field, AnswerValue::Choices(selected));
        Ok(now_selected)
    }

    /// Run the field's rule now and record or clear its inline error.
    ///
    /// Used by front ends that show errors as soon as a field loses focus.
    pub fn touch(&mut self, field: impl Into<FieldId>) -> Result<Option<&str>, WizardError> {
        let field = field.into();
        let definition = self
            .form
            .field(&field)
            .ok_or_else(|| WizardError::UnknownField(field.clone()))?;
        match check_field(definition, &self.answers) {
            Ok(()) => {
                self.errors.remove(&field);
                Ok(None)
            }
            Err(message) => {
                self.errors.insert(field.clone(), message);
                Ok(self.errors.get(&field))
            }
        }
    }

    fn editable_kind(&self, field: &FieldId) -> Result<&FieldKind, WizardError> {
        if self.is_submitted() {
            return Err(WizardError::Closed);
        }
        self.form
            .field(field)
            .map(|f| f.kind())
            .ok_or_else(|| WizardError::UnknownField(field.clone()))
    }

    // === Navigation ===

    /// Whether the step `step` is complete under the current answers.
    pub fn is_step_complete(&self, step: usize) -> bool {
        is_step_complete(&self.form, step, &self.answers)
    }

    /// Whether "next" is enabled: not on the last step and the current step is complete.
    pub fn can_advance(&self) -> bool {
        match self.state {
            WizardState::Step(i) => i < self.step_count() && self.is_step_complete(i),
            WizardState::Submitted => false,
        }
    }

    /// Move to the next step. A no-op returning `false` when not allowed.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        if let WizardState::Step(i) = self.state {
            self.state = WizardState::Step(i + 1);
            debug!(step = i + 1, "advanced");
        }
        true
    }

    /// Move to the previous step. Never blocked by validity; a no-op on step 1.
    pub fn retreat(&mut self) -> bool {
        match self.state {
            WizardState::Step(i) if i > 1 => {
                self.state = WizardState::Step(i - 1);
                debug!(step = i - 1, "retreated");
                true
            }
            _ => false,
        }
    }

    /// Helper text while "next" is disabled because the current step is incomplete.
    pub fn helper_message(&self) -> Option<&str> {
        match self.state {
            WizardState::Step(i) if i < self.step_count() && !self.is_step_complete(i) => {
                Some(self.form.incomplete_notice())
            }
            _ => None,
        }
    }

    // === Submission ===

    /// Validate everything and, if valid, deliver the answers once.
    ///
    /// Only acts on the final step. On success the wizard becomes `Submitted`
    /// and the answers move into the returned `Submission`. On failure the
    /// answers and step are untouched so the user can retry.
    pub fn submit(&mut self, submitter: &impl Submitter) -> SubmitOutcome {
        let step = match self.state {
            WizardState::Submitted => return SubmitOutcome::AlreadySubmitted,
            WizardState::Step(i) => i,
        };
        if step != self.step_count() {
            return SubmitOutcome::NotReady;
        }

        self.errors.clear();
        self.notice = None;

        let errors = validate_all(&self.form, &self.answers);
        if !errors.is_empty() {
            let count = errors.len();
            warn!(count, "submission blocked by validation errors");
            self.errors = errors;
            return SubmitOutcome::Invalid(count);
        }

        info!(answers = self.answers.len(), "submitting intake form");
        match submitter.submit(&self.answers) {
            Ok(receipt) => {
                info!(status = receipt.status, "intake form submitted");
                self.state = WizardState::Submitted;
                let answers = std::mem::take(&mut self.answers);
                SubmitOutcome::Submitted(Submission { answers, receipt })
            }
            Err(err) => {
                warn!(error = %err, "intake form submission failed");
                let notice = err
                    .user_message()
                    .unwrap_or(self.form.failure_notice())
                    .to_string();
                self.notice = Some(notice.clone());
                SubmitOutcome::Failed(notice)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChoiceField, FieldDefinition, TestSubmitter};

    fn form() -> FormDefinition {
        FormDefinition::builder()
            .step_with_fields(
                "Datos",
                None,
                [
                    FieldDefinition::text("nombre", "Nombre").required(),
                    FieldDefinition::int("edad", "Edad", Some(16), Some(100)).required(),
                ],
            )
            .step_with_fields(
                "Trabajo",
                None,
                [
                    FieldDefinition::toggle("trabaja", "¿Trabajas?"),
                    FieldDefinition::text("horario", "Horario").required_when_true("trabaja"),
                ],
            )
            .step_with_fields(
                "Objetivos",
                None,
                [FieldDefinition::multi_choice(
                    "objetivos",
                    "Objetivos",
                    ChoiceField::from_values(["Tonificar", "otro"]),
                )
                .required()],
            )
            .failure_notice("Hubo un error")
            .build()
            .unwrap()
    }

    fn filled() -> WizardController {
        let mut wizard = WizardController::new(form());
        wizard.set("nombre", "Ana").unwrap();
        wizard.set("edad", 30).unwrap();
        assert!(wizard.advance());
        assert!(wizard.advance());
        wizard.toggle_choice("objetivos", "Tonificar").unwrap();
        wizard
    }

    #[test]
    fn starts_at_step_one() {
        let wizard = WizardController::new(form());
        assert_eq!(wizard.state(), WizardState::Step(1));
        assert_eq!(wizard.progress(), (1, 3));
        assert!(!wizard.can_advance());
        assert_eq!(
            wizard.helper_message(),
            Some("Complete all required fields to continue")
        );
    }

    #[test]
    fn advance_is_noop_while_incomplete() {
        let mut wizard = WizardController::new(form());
        wizard.set("nombre", "Ana").unwrap();
        assert!(!wizard.advance());
        assert_eq!(wizard.state(), WizardState::Step(1));

        wizard.set("edad", 30).unwrap();
        assert!(wizard.advance());
        assert_eq!(wizard.state(), WizardState::Step(2));
    }

    #[test]
    fn retreat_bounds() {
        let mut wizard = WizardController::new(form());
        assert!(!wizard.retreat());
        assert_eq!(wizard.state(), WizardState::Step(1));

        let mut wizard = filled();
        assert_eq!(wizard.state(), WizardState::Step(3));
        wizard.set("objetivos", AnswerValue::empty_choices()).unwrap();
        assert!(wizard.retreat());
        assert_eq!(wizard.state(), WizardState::Step(2));
    }

    #[test]
    fn cannot_advance_past_last_step() {
        let mut wizard = filled();
        assert!(wizard.is_final_step());
        assert!(!wizard.can_advance());
        assert!(!wizard.advance());
        assert_eq!(wizard.helper_message(), None);
    }

    #[test]
    fn conditional_field_blocks_only_when_triggered() {
        let mut wizard = WizardController::new(form());
        wizard.set("nombre", "Ana").unwrap();
        wizard.set("edad", 30).unwrap();
        wizard.advance();

        assert!(wizard.can_advance());
        wizard.set("trabaja", true).unwrap();
        assert!(!wizard.can_advance());
        wizard.set("horario", "9-17").unwrap();
        assert!(wizard.can_advance());
        wizard.set("horario", "").unwrap();
        wizard.set("trabaja", false).unwrap();
        assert!(wizard.can_advance());
    }

    #[test]
    fn edits_are_type_checked() {
        let mut wizard = WizardController::new(form());
        assert!(matches!(
            wizard.set("edad", "treinta"),
            Err(WizardError::TypeMismatch { .. })
        ));
        assert!(matches!(
            wizard.set("peso", 70),
            Err(WizardError::UnknownField(_))
        ));
        assert!(matches!(
            wizard.toggle_choice("objetivos", "Bailar"),
            Err(WizardError::UnknownOption { .. })
        ));
        assert!(matches!(
            wizard.toggle_choice("nombre", "Ana"),
            Err(WizardError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut wizard = WizardController::new(form());
        assert!(wizard.toggle_choice("objetivos", "otro").unwrap());
        assert!(wizard.answers().includes(&FieldId::new("objetivos"), "otro"));
        assert!(!wizard.toggle_choice("objetivos", "otro").unwrap());
        assert!(!wizard.answers().has_value(&FieldId::new("objetivos")));
    }

    #[test]
    fn clear_restores_default() {
        let mut wizard = WizardController::new(form());
        wizard.set("trabaja", true).unwrap();
        wizard.set("nombre", "Ana").unwrap();
        wizard.clear("trabaja").unwrap();
        wizard.clear("nombre").unwrap();
        assert_eq!(
            wizard.answers().get(&FieldId::new("trabaja")),
            Some(&AnswerValue::Bool(false))
        );
        assert!(!wizard.answers().contains(&FieldId::new("nombre")));
    }

    #[test]
    fn touch_records_and_clears_inline_error() {
        let mut wizard = WizardController::new(form());
        wizard.set("edad", 15).unwrap();
        assert_eq!(
            wizard.touch("edad").unwrap(),
            Some("Value must be between 16 and 100")
        );
        assert!(wizard.errors().contains(&FieldId::new("edad")));

        wizard.set("edad", 16).unwrap();
        assert_eq!(wizard.touch("edad").unwrap(), None);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn submit_only_from_final_step() {
        let mut wizard = WizardController::new(form());
        let submitter = TestSubmitter::new();
        assert_eq!(wizard.submit(&submitter), SubmitOutcome::NotReady);
        assert_eq!(submitter.attempts(), 0);
    }

    #[test]
    fn submit_blocked_by_validation() {
        let mut wizard = filled();
        wizard.retreat();
        wizard.retreat();
        wizard.set("edad", 15).unwrap();
        wizard.advance();
        wizard.advance();

        let submitter = TestSubmitter::new();
        assert_eq!(wizard.submit(&submitter), SubmitOutcome::Invalid(1));
        assert_eq!(wizard.state(), WizardState::Step(3));
        assert!(wizard.errors().contains(&FieldId::new("edad")));
        assert_eq!(submitter.attempts(), 0);
    }

    #[test]
    fn successful_submit_is_terminal() {
        let mut wizard = filled();
        let submitter = TestSubmitter::new();

        let SubmitOutcome::Submitted(submission) = wizard.submit(&submitter) else {
            panic!("expected submission");
        };
        assert_eq!(submission.receipt.status, 200);
        assert_eq!(
            submission.answers.get_text(&FieldId::new("nombre")).unwrap(),
            "Ana"
        );
        assert_eq!(wizard.state(), WizardState::Submitted);
        assert!(wizard.answers().is_empty());
        assert_eq!(wizard.progress(), (3, 3));

        assert_eq!(wizard.submit(&submitter), SubmitOutcome::AlreadySubmitted);
        assert!(!wizard.retreat());
        assert!(matches!(wizard.set("nombre", "Eva"), Err(WizardError::Closed)));
        assert_eq!(submitter.attempts(), 1);
    }

    #[test]
    fn failed_submit_keeps_answers() {
        let mut wizard = filled();
        let before = wizard.answers().clone();
        let submitter = TestSubmitter::new().with_rejection(500, None);

        assert_eq!(
            wizard.submit(&submitter),
            SubmitOutcome::Failed("Hubo un error".into())
        );
        assert_eq!(wizard.state(), WizardState::Step(3));
        assert_eq!(wizard.answers(), &before);
        assert_eq!(wizard.notice(), Some("Hubo un error"));

        wizard.dismiss_notice();
        assert_eq!(wizard.notice(), None);

        assert!(matches!(
            wizard.submit(&submitter),
            SubmitOutcome::Submitted(_)
        ));
        assert_eq!(submitter.attempts(), 2);
    }

    #[test]
    fn failure_notice_prefers_endpoint_message() {
        let mut wizard = filled();
        let submitter = TestSubmitter::new().with_refusal(Some("Cupo completo".into()));
        assert_eq!(
            wizard.submit(&submitter),
            SubmitOutcome::Failed("Cupo completo".into())
        );
    }

    struct Inconsistent;

    impl IntakeForm for Inconsistent {
        fn form(&self) -> Result<FormDefinition, DefinitionError> {
            FormDefinition::builder()
                .field(FieldDefinition::text("nombre", "Nombre"))
                .step(StepDefinition::new("Datos", ["nombre", "apellido"]))
                .build()
        }
    }

    #[test]
    fn for_form_reports_inconsistent_definition() {
        assert!(matches!(
            WizardController::for_form(&Inconsistent),
            Err(DefinitionError::UnknownField { .. })
        ));
        assert!(WizardController::for_form(&FixedForm).is_ok());
    }

    struct FixedForm;

    impl IntakeForm for FixedForm {
        fn form(&self) -> Result<FormDefinition, DefinitionError> {
            Ok(form())
        }
    }
}
