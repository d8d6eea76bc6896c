use crate::{AnswerSet, FieldId};

/// Whether a field must be filled in.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Requirement {
    /// Always required.
    Required,

    /// Never required; checked only when a value is present.
    #[default]
    Optional,

    /// Required only while the condition holds. When it does not hold the field
    /// is ignored entirely, including any stale value it still carries.
    When(Condition),
}

impl Requirement {
    /// Required while the given boolean field is `true`.
    pub fn when_true(field: impl Into<FieldId>) -> Self {
        Self::When(Condition::IsTrue(field.into()))
    }

    /// Required while the given choice field includes `option`.
    pub fn when_includes(field: impl Into<FieldId>, option: impl Into<String>) -> Self {
        Self::When(Condition::Includes {
            field: field.into(),
            option: option.into(),
        })
    }

    /// Whether the field must hold a value under the current answers.
    pub fn is_required(&self, answers: &AnswerSet) -> bool {
        match self {
            Self::Required => true,
            Self::Optional => false,
            Self::When(condition) => condition.holds(answers),
        }
    }

    /// Whether the field takes part in validation at all under the current answers.
    pub fn is_active(&self, answers: &AnswerSet) -> bool {
        match self {
            Self::Required | Self::Optional => true,
            Self::When(condition) => condition.holds(answers),
        }
    }

    /// The condition this requirement depends on, if any.
    pub fn condition(&self) -> Option<&Condition> {
        match self {
            Self::When(condition) => Some(condition),
            _ => None,
        }
    }
}

/// A predicate over other answers that governs a conditional field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The boolean field is `true`.
    IsTrue(FieldId),

    /// The choice or multi-choice field includes the option value.
    Includes { field: FieldId, option: String },
}

impl Condition {
    /// Evaluate against the current answers.
    pub fn holds(&self, answers: &AnswerSet) -> bool {
        match self {
            Self::IsTrue(field) => answers.is_true(field),
            Self::Includes { field, option } => answers.includes(field, option),
        }
    }

    /// The governing field.
    pub fn field(&self) -> &FieldId {
        match self {
            Self::IsTrue(field) | Self::Includes { field, .. } => field,
        }
    }
}
