//! # intake
//!
//! Multi-step client intake wizard. Front-end agnostic.
//!
//! A form is a field registry plus an ordered step table (`FormDefinition`).
//! A `WizardController` walks the steps, holds the answers of one session,
//! decides whether "next" is allowed and finally hands the validated answers
//! to a `Submitter`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use intake::{FieldDefinition, FormDefinition, SubmitOutcome, TestSubmitter, WizardController};
//!
//! let form = FormDefinition::builder()
//!     .step_with_fields("Datos", None, [
//!         FieldDefinition::text("nombreCompleto", "Nombre completo").required(),
//!         FieldDefinition::int("edad", "Edad", Some(16), Some(100)).required(),
//!     ])
//!     .build()?;
//!
//! let mut wizard = WizardController::new(form);
//! wizard.set("nombreCompleto", "Ana López")?;
//! wizard.set("edad", 34)?;
//!
//! match wizard.submit(&TestSubmitter::new()) {
//!     SubmitOutcome::Submitted(submission) => println!("sent {} answers", submission.answers.len()),
//!     other => println!("not sent: {other:?}"),
//! }
//! ```
//!
//! ## Front ends
//!
//! Front ends are separate crates that drive a `WizardController`:
//! - `intake-wizard-dialoguer` - terminal prompts via dialoguer
//!
//! Submission clients implement `Submitter`:
//! - `intake-http` - JSON `POST` via reqwest

// Re-export all types from intake-types
pub use intake_types::*;

mod wizard;
pub use wizard::{Submission, SubmitOutcome, WizardController, WizardError, WizardState};

// Test submitter for driving the wizard without a network
mod test_submitter;
pub use test_submitter::TestSubmitter;
