use std::collections::{HashMap, HashSet};

use crate::{
    AnswerSet, Condition, DefinitionError, FieldDefinition, FieldId, FieldKind, StepDefinition,
};

const DEFAULT_INCOMPLETE_NOTICE: &str = "Complete all required fields to continue";
const DEFAULT_FAILURE_NOTICE: &str = "The form could not be sent. Please try again.";
const DEFAULT_SUCCESS_MESSAGE: &str = "Form sent successfully.";

/// The complete, validated definition of an intake form.
///
/// Holds the field registry and the ordered step table. It is immutable once
/// built: every step references known fields, every field appears on exactly
/// one step, and every condition points at a field of a fitting kind.
#[derive(Debug, Clone)]
pub struct FormDefinition {
    /// Optional message shown before the first step.
    pub prelude: Option<String>,

    /// Optional message shown after a successful submission.
    pub epilogue: Option<String>,

    fields: Vec<FieldDefinition>,
    steps: Vec<StepDefinition>,
    index: HashMap<FieldId, usize>,
    incomplete_notice: String,
    failure_notice: String,
    success_message: String,
}

impl FormDefinition {
    /// Start building a form.
    pub fn builder() -> FormBuilder {
        FormBuilder::default()
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Look up a field by id.
    pub fn field(&self, id: &FieldId) -> Option<&FieldDefinition> {
        self.index.get(id).map(|&i| &self.fields[i])
    }

    /// All steps in order.
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Number of steps (`N`). Always at least one.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get a step by its 1-based position.
    pub fn step(&self, step: usize) -> Option<&StepDefinition> {
        step.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// The fields of a step, resolved to their definitions.
    pub fn step_fields(&self, step: usize) -> impl Iterator<Item = &FieldDefinition> {
        self.step(step)
            .into_iter()
            .flat_map(|s| s.fields())
            .filter_map(|id| self.field(id))
    }

    /// The 1-based position of the step that shows `field`.
    pub fn step_of(&self, field: &FieldId) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| s.contains(field))
            .map(|i| i + 1)
    }

    /// A fresh answer set holding every declared default.
    pub fn initial_answers(&self) -> AnswerSet {
        let mut answers = AnswerSet::new();
        for field in &self.fields {
            if let Some(value) = field.initial_value() {
                answers.insert(field.id().clone(), value);
            }
        }
        answers
    }

    /// Helper text shown while the current step is incomplete.
    pub fn incomplete_notice(&self) -> &str {
        &self.incomplete_notice
    }

    /// Generic notice shown when a submission fails.
    pub fn failure_notice(&self) -> &str {
        &self.failure_notice
    }

    /// Message shown once the form has been submitted.
    pub fn success_message(&self) -> &str {
        &self.success_message
    }
}

/// Builder for [`FormDefinition`].
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    prelude: Option<String>,
    epilogue: Option<String>,
    fields: Vec<FieldDefinition>,
    steps: Vec<StepDefinition>,
    incomplete_notice: Option<String>,
    failure_notice: Option<String>,
    success_message: Option<String>,
}

impl FormBuilder {
    /// Set the prelude message.
    pub fn prelude(mut self, prelude: impl Into<String>) -> Self {
        self.prelude = Some(prelude.into());
        self
    }

    /// Set the epilogue message.
    pub fn epilogue(mut self, epilogue: impl Into<String>) -> Self {
        self.epilogue = Some(epilogue.into());
        self
    }

    /// Add a field to the registry.
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Add several fields to the registry.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDefinition>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Append a step.
    pub fn step(mut self, step: StepDefinition) -> Self {
        self.steps.push(step);
        self
    }

    /// Add fields and a step showing exactly those fields, in order.
    pub fn step_with_fields(
        mut self,
        label: impl Into<String>,
        icon: Option<&str>,
        fields: impl IntoIterator<Item = FieldDefinition>,
    ) -> Self {
        let fields: Vec<_> = fields.into_iter().collect();
        let mut step = StepDefinition::new(label, fields.iter().map(|f| f.id().clone()));
        if let Some(icon) = icon {
            step = step.with_icon(icon);
        }
        self.fields.extend(fields);
        self.steps.push(step);
        self
    }

    /// Set the helper text shown while a step is incomplete.
    pub fn incomplete_notice(mut self, notice: impl Into<String>) -> Self {
        self.incomplete_notice = Some(notice.into());
        self
    }

    /// Set the generic notice shown when submission fails.
    pub fn failure_notice(mut self, notice: impl Into<String>) -> Self {
        self.failure_notice = Some(notice.into());
        self
    }

    /// Set the message shown after a successful submission.
    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    /// Check the field registry and step table and build the form.
    pub fn build(self) -> Result<FormDefinition, DefinitionError> {
        if self.steps.is_empty() {
            return Err(DefinitionError::NoSteps);
        }

        let mut index = HashMap::new();
        for (i, field) in self.fields.iter().enumerate() {
            if field.id().is_empty() {
                return Err(DefinitionError::EmptyFieldId(i));
            }
            if index.insert(field.id().clone(), i).is_some() {
                return Err(DefinitionError::DuplicateField(field.id().clone()));
            }
            if let Some(options) = field.kind().options()
                && options.is_empty()
            {
                return Err(DefinitionError::NoOptions(field.id().clone()));
            }
        }

        let mut placed = HashSet::new();
        for (i, step) in self.steps.iter().enumerate() {
            if step.fields().is_empty() {
                return Err(DefinitionError::EmptyStep(i + 1));
            }
            for id in step.fields() {
                if !index.contains_key(id) {
                    return Err(DefinitionError::UnknownField {
                        step: i + 1,
                        field: id.clone(),
                    });
                }
                if !placed.insert(id.clone()) {
                    return Err(DefinitionError::FieldOnSeveralSteps(id.clone()));
                }
            }
        }

        for field in &self.fields {
            if !placed.contains(field.id()) {
                return Err(DefinitionError::FieldWithoutStep(field.id().clone()));
            }
            if let Some(condition) = field.requirement().condition() {
                check_condition(field.id(), condition, &self.fields, &index)?;
            }
        }

        Ok(FormDefinition {
            prelude: self.prelude,
            epilogue: self.epilogue,
            fields: self.fields,
            steps: self.steps,
            index,
            incomplete_notice: self
                .incomplete_notice
                .unwrap_or_else(|| DEFAULT_INCOMPLETE_NOTICE.to_string()),
            failure_notice: self
                .failure_notice
                .unwrap_or_else(|| DEFAULT_FAILURE_NOTICE.to_string()),
            success_message: self
                .success_message
                .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
        })
    }
}

fn check_condition(
    dependent: &FieldId,
    condition: &Condition,
    fields: &[FieldDefinition],
    index: &HashMap<FieldId, usize>,
) -> Result<(), DefinitionError> {
    let governing = condition.field();
    let Some(&i) = index.get(governing) else {
        return Err(DefinitionError::UnknownCondition {
            field: dependent.clone(),
            governing: governing.clone(),
        });
    };
    let fits = match (condition, fields[i].kind()) {
        (Condition::IsTrue(_), FieldKind::Bool(_)) => true,
        (
            Condition::Includes { option, .. },
            FieldKind::Choice(choice) | FieldKind::MultiChoice(choice),
        ) => choice.contains(option),
        _ => false,
    };
    if fits && governing != dependent {
        Ok(())
    } else {
        Err(DefinitionError::InvalidCondition {
            field: dependent.clone(),
            governing: governing.clone(),
        })
    }
}
