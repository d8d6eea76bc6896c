use crate::FieldId;

/// Error returned when a field registry and step table do not fit together.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("Form has no steps")]
    NoSteps,

    #[error("Step {0} shows no fields")]
    EmptyStep(usize),

    #[error("Field #{0} has an empty id")]
    EmptyFieldId(usize),

    #[error("Field '{0}' is declared more than once")]
    DuplicateField(FieldId),

    #[error("Step {step} refers to unknown field '{field}'")]
    UnknownField { step: usize, field: FieldId },

    #[error("Field '{0}' appears on more than one step")]
    FieldOnSeveralSteps(FieldId),

    #[error("Field '{0}' is not shown on any step")]
    FieldWithoutStep(FieldId),

    #[error("Field '{0}' offers no options")]
    NoOptions(FieldId),

    #[error("Field '{field}' depends on unknown field '{governing}'")]
    UnknownCondition { field: FieldId, governing: FieldId },

    #[error("Field '{field}' has a condition that field '{governing}' cannot satisfy")]
    InvalidCondition { field: FieldId, governing: FieldId },
}

/// Error type for submission attempts.
///
/// Every variant is recoverable: the answers are kept and the user may retry.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The endpoint answered with a non-success status.
    #[error("Submission rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// The endpoint answered with a success status but reported `success: false`.
    #[error("Submission refused by the endpoint")]
    Refused { message: Option<String> },

    /// The response body could not be understood.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request never completed (DNS, connection, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(#[from] anyhow::Error),
}

impl SubmitError {
    /// Create a transport error from any error type.
    pub fn transport(err: impl Into<anyhow::Error>) -> Self {
        Self::Transport(err.into())
    }

    /// The message supplied by the endpoint for display, if any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } | Self::Refused { message } => message.as_deref(),
            Self::MalformedResponse(_) | Self::Transport(_) => None,
        }
    }
}
