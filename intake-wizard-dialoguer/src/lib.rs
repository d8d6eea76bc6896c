//! # intake-wizard-dialoguer
//!
//! Dialoguer front end for the intake wizard.
//!
//! Steps are presented one at a time in a classic CLI wizard style. Every
//! answer is checked as it is entered, and the navigation menu mirrors the
//! controller's rules: "next" only moves on once the step is complete and the
//! last step offers "submit" instead.
//!
//! ## Example
//!
//! ```rust,ignore
//! use intake::WizardController;
//! use intake_http::HttpSubmitter;
//! use intake_wizard_dialoguer::DialoguerWizard;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut wizard = WizardController::new(form);
//!     let submitter = HttpSubmitter::new("https://example.com/api/submit")?;
//!     let submission = DialoguerWizard::new().run(&mut wizard, &submitter)?;
//!     println!("sent {} answers", submission.answers.len());
//!     Ok(())
//! }
//! ```

mod frontend;
mod prompt;

pub use frontend::{DialoguerError, DialoguerWizard, Texts};
