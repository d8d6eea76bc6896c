use crate::{AnswerSet, DefinitionError, FormDefinition, SubmitError};

/// Trait for types that describe a complete intake form.
///
/// Form variants implement this to hand a ready-built definition to a controller.
pub trait IntakeForm {
    /// Returns the field registry and step table.
    ///
    /// # Errors
    /// The `DefinitionError` of `FormBuilder::build` when the table is inconsistent.
    fn form(&self) -> Result<FormDefinition, DefinitionError>;
}

/// What the endpoint reported for an accepted submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// HTTP-like status code of the response.
    pub status: u16,

    /// Optional message returned by the endpoint.
    pub message: Option<String>,
}

impl SubmitReceipt {
    /// A receipt with the given status and no message.
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            message: None,
        }
    }
}

/// Trait for clients that deliver a completed answer set.
///
/// Implementations perform at most one attempt per call: no retries,
/// no backoff. The caller must only pass answers that passed full validation.
pub trait Submitter {
    /// Send the answers.
    ///
    /// # Returns
    /// * `Ok(receipt)` when the endpoint accepted the submission
    /// * `Err` on a rejected, refused or unreadable response, or a transport failure
    fn submit(&self, answers: &AnswerSet) -> Result<SubmitReceipt, SubmitError>;
}

impl<S: Submitter + ?Sized> Submitter for &S {
    fn submit(&self, answers: &AnswerSet) -> Result<SubmitReceipt, SubmitError> {
        (**self).submit(answers)
    }
}
