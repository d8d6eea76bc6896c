//! Test submitter for driving the wizard without a network.
//!
//! `TestSubmitter` answers submissions from a script of pre-defined outcomes and
//! records every answer set it was handed. Once the script runs out it accepts
//! with status 200.
//!
//! # Example
//!
//! ```rust,ignore
//! use intake::{SubmitOutcome, TestSubmitter, WizardController};
//!
//! let submitter = TestSubmitter::new()
//!     .with_rejection(500, None)
//!     .with_acceptance(201);
//!
//! assert!(matches!(wizard.submit(&submitter), SubmitOutcome::Failed(_)));
//! assert!(matches!(wizard.submit(&submitter), SubmitOutcome::Submitted(_)));
//! assert_eq!(submitter.attempts(), 2);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::{AnswerSet, SubmitError, SubmitReceipt, Submitter};

#[derive(Debug, Clone)]
enum Scripted {
    Accept(u16),
    Reject { status: u16, message: Option<String> },
    Refuse(Option<String>),
    Transport(String),
}

impl Scripted {
    fn into_result(self) -> Result<SubmitReceipt, SubmitError> {
        match self {
            Scripted::Accept(status) => Ok(SubmitReceipt::with_status(status)),
            Scripted::Reject { status, message } => Err(SubmitError::Rejected { status, message }),
            Scripted::Refuse(message) => Err(SubmitError::Refused { message }),
            Scripted::Transport(reason) => Err(SubmitError::transport(anyhow::anyhow!(reason))),
        }
    }
}

/// A submitter that replays scripted outcomes and records what it was sent.
#[derive(Debug, Default)]
pub struct TestSubmitter {
    script: RefCell<VecDeque<Scripted>>,
    sent: RefCell<Vec<AnswerSet>>,
}

impl TestSubmitter {
    /// Create a submitter that accepts everything with status 200.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an acceptance with the given status.
    pub fn with_acceptance(self, status: u16) -> Self {
        self.push(Scripted::Accept(status))
    }

    /// Queue a non-success response.
    pub fn with_rejection(self, status: u16, message: Option<String>) -> Self {
        self.push(Scripted::Reject { status, message })
    }

    /// Queue a success status whose body reports `success: false`.
    pub fn with_refusal(self, message: Option<String>) -> Self {
        self.push(Scripted::Refuse(message))
    }

    /// Queue a request that never completes.
    pub fn with_transport_failure(self, reason: impl Into<String>) -> Self {
        self.push(Scripted::Transport(reason.into()))
    }

    fn push(self, outcome: Scripted) -> Self {
        self.script.borrow_mut().push_back(outcome);
        self
    }

    /// Every answer set handed to `submit`, in order.
    pub fn sent(&self) -> Vec<AnswerSet> {
        self.sent.borrow().clone()
    }

    /// Number of `submit` calls.
    pub fn attempts(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Submitter for TestSubmitter {
    fn submit(&self, answers: &AnswerSet) -> Result<SubmitReceipt, SubmitError> {
        self.sent.borrow_mut().push(answers.clone());
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or(Scripted::Accept(200))
            .into_result()
    }
}
