use chrono::NaiveDate;

use crate::{AnswerValue, FieldId, Requirement};

/// A single field of an intake form.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    /// The id under which this field's answer is stored and submitted.
    id: FieldId,

    /// The label shown to the user.
    label: String,

    /// The kind of field (determines value type and static rules).
    kind: FieldKind,

    /// Whether (and when) the field must be filled in.
    requirement: Requirement,

    /// Value placed in a fresh answer set, if any.
    initial: Option<AnswerValue>,

    /// Message shown for any rule failure, replacing the generic one.
    message: Option<String>,
}

impl FieldDefinition {
    /// Create a new optional field.
    pub fn new(id: impl Into<FieldId>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            requirement: Requirement::Optional,
            initial: None,
            message: None,
        }
    }

    /// Single-line text field.
    pub fn text(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text(TextField::new()))
    }

    /// Multi-line text field.
    pub fn multiline(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text(TextField::multiline()))
    }

    /// Email address field.
    pub fn email(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text(TextField::with_format(TextFormat::Email)))
    }

    /// Phone number field.
    pub fn phone(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text(TextField::with_format(TextFormat::Phone)))
    }

    /// Whole number field with optional bounds.
    pub fn int(
        id: impl Into<FieldId>,
        label: impl Into<String>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Self {
        Self::new(id, label, FieldKind::Int(IntField { min, max }))
    }

    /// Decimal number field with optional bounds.
    pub fn float(
        id: impl Into<FieldId>,
        label: impl Into<String>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Self {
        Self::new(id, label, FieldKind::Float(FloatField { min, max }))
    }

    /// Yes/no toggle, starting as `false`.
    pub fn toggle(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Bool(BoolField::default()))
    }

    /// Consent checkbox that only passes once set to `true`.
    pub fn consent(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Bool(BoolField { must_be_true: true }))
            .with_requirement(Requirement::Required)
    }

    /// Pick exactly one option.
    pub fn choice(id: impl Into<FieldId>, label: impl Into<String>, field: ChoiceField) -> Self {
        Self::new(id, label, FieldKind::Choice(field))
    }

    /// Pick any number of options, starting as the empty set.
    pub fn multi_choice(
        id: impl Into<FieldId>,
        label: impl Into<String>,
        field: ChoiceField,
    ) -> Self {
        Self::new(id, label, FieldKind::MultiChoice(field))
    }

    /// Calendar date field.
    pub fn date(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Date(DateField::default()))
    }

    /// Mark the field as always required.
    pub fn required(self) -> Self {
        self.with_requirement(Requirement::Required)
    }

    /// Mark the field as required while `field` is `true`.
    pub fn required_when_true(self, field: impl Into<FieldId>) -> Self {
        self.with_requirement(Requirement::when_true(field))
    }

    /// Mark the field as required while choice `field` includes `option`.
    pub fn required_when_includes(
        self,
        field: impl Into<FieldId>,
        option: impl Into<String>,
    ) -> Self {
        self.with_requirement(Requirement::when_includes(field, option))
    }

    /// Set the requirement.
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// Set the initial value of a fresh answer set.
    pub fn with_initial(mut self, value: impl Into<AnswerValue>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Set the message shown for any rule failure.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set a placeholder on a text field. Ignored for other kinds.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        if let FieldKind::Text(text) = &mut self.kind {
            text.placeholder = Some(placeholder.into());
        }
        self
    }

    /// Get the field id.
    pub fn id(&self) -> &FieldId {
        &self.id
    }

    /// Get the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the field kind.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Get the requirement.
    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// Get the custom failure message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The value this field holds in a fresh answer set.
    ///
    /// Explicit initial values win; otherwise toggles start as `false` and
    /// multi-choice fields as the empty set. Other kinds start absent.
    pub fn initial_value(&self) -> Option<AnswerValue> {
        if let Some(value) = &self.initial {
            return Some(value.clone());
        }
        match &self.kind {
            FieldKind::Bool(_) => Some(AnswerValue::Bool(false)),
            FieldKind::MultiChoice(_) => Some(AnswerValue::empty_choices()),
            _ => None,
        }
    }
}

/// The kind of field, determining the value type and its static rules.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text, optionally with a format rule.
    Text(TextField),

    /// Whole number with optional bounds.
    Int(IntField),

    /// Decimal number with optional bounds.
    Float(FloatField),

    /// Yes/no.
    Bool(BoolField),

    /// Exactly one of a fixed option set.
    Choice(ChoiceField),

    /// Any subset of a fixed option set.
    MultiChoice(ChoiceField),

    /// Calendar date with optional bounds.
    Date(DateField),
}

impl FieldKind {
    /// Name of the answer type this kind accepts.
    pub fn value_type(&self) -> &'static str {
        match self {
            Self::Text(_) => "Text",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Bool(_) => "Bool",
            Self::Choice(_) => "Choice",
            Self::MultiChoice(_) => "Choices",
            Self::Date(_) => "Date",
        }
    }

    /// Whether the value has the right shape for this kind.
    ///
    /// Float fields also accept integers.
    pub fn accepts(&self, value: &AnswerValue) -> bool {
        matches!(
            (self, value),
            (Self::Text(_), AnswerValue::Text(_))
                | (Self::Int(_), AnswerValue::Int(_))
                | (Self::Float(_), AnswerValue::Float(_) | AnswerValue::Int(_))
                | (Self::Bool(_), AnswerValue::Bool(_))
                | (Self::Choice(_), AnswerValue::Choice(_))
                | (Self::MultiChoice(_), AnswerValue::Choices(_))
                | (Self::Date(_), AnswerValue::Date(_))
        )
    }

    /// The option set of a choice or multi-choice field.
    pub fn options(&self) -> Option<&[ChoiceOption]> {
        match self {
            Self::Choice(field) | Self::MultiChoice(field) => Some(field.options()),
            _ => None,
        }
    }
}

/// Format rules for text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    /// `local@domain.tld`
    Email,

    /// 9 to 15 characters of digits, `+`, `-`, spaces and parentheses.
    Phone,
}

/// Configuration for a text field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    /// Render as a textarea.
    pub multiline: bool,

    /// Hint shown while empty.
    pub placeholder: Option<String>,

    /// Format rule applied to non-empty values.
    pub format: Option<TextFormat>,
}

impl TextField {
    /// Create a plain single-line text field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a multi-line text field.
    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    /// Create a text field with a format rule.
    pub fn with_format(format: TextFormat) -> Self {
        Self {
            format: Some(format),
            ..Self::default()
        }
    }
}

/// Configuration for an integer field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntField {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// Configuration for a decimal field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloatField {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Configuration for a yes/no field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolField {
    /// Consent fields fail validation while `false`.
    pub must_be_true: bool,
}

/// Configuration for a date field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateField {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

/// One selectable option of a choice field.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    /// The value stored in the answer set and submitted.
    pub value: String,

    /// Text shown for the option. Defaults to the value.
    pub label: String,

    /// Optional presentation icon.
    pub icon: Option<String>,
}

impl ChoiceOption {
    /// Create an option whose label is its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            icon: None,
        }
    }

    /// Set a label different from the value.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the presentation icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// The fixed option set of a choice or multi-choice field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceField {
    options: Vec<ChoiceOption>,
}

impl ChoiceField {
    /// Create from fully configured options.
    pub fn new(options: Vec<ChoiceOption>) -> Self {
        Self { options }
    }

    /// Create from plain values, each its own label.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(values.into_iter().map(ChoiceOption::new).collect())
    }

    /// Get the options in display order.
    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// Check if `value` is one of the declared options.
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}
