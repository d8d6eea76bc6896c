use crate::FieldId;

/// One screen of the wizard: a label and the fields it shows, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDefinition {
    /// Heading shown for the step.
    label: String,

    /// Optional presentation icon.
    icon: Option<String>,

    /// The fields displayed on this step.
    fields: Vec<FieldId>,
}

impl StepDefinition {
    /// Create a step with the given fields.
    pub fn new<I, F>(label: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldId>,
    {
        Self {
            label: label.into(),
            icon: None,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Set the presentation icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Get the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the icon.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Get the field ids in display order.
    pub fn fields(&self) -> &[FieldId] {
        &self.fields
    }

    /// Check if the step shows the given field.
    pub fn contains(&self, field: &FieldId) -> bool {
        self.fields.contains(field)
    }
}
