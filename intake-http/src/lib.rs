//! # intake-http
//!
//! Delivers completed intake answer sets over HTTP.
//!
//! - `HttpSubmitter` - one JSON `POST` per submission, implementing `intake::Submitter`
//! - `IntakeConfig` - endpoint and messaging settings, loadable from YAML
//! - `messaging` - the post-submission deep link to the trainer's chat
//!
//! ## Usage
//!
//! ```rust,ignore
//! use intake::{SubmitOutcome, WizardController};
//! use intake_http::{HttpSubmitter, IntakeConfig};
//!
//! let config = IntakeConfig::default().with_env_overrides();
//! let submitter = HttpSubmitter::from_config(&config)?;
//!
//! if let SubmitOutcome::Submitted(submission) = wizard.submit(&submitter) {
//!     println!("status {}", submission.receipt.status);
//! }
//! ```

mod client;
pub use client::{HttpSubmitError, HttpSubmitter};

mod config;
pub use config::{ConfigError, DEFAULT_ENDPOINT, DEFAULT_MESSAGING_HOST, ENDPOINT_ENV, IntakeConfig};

pub mod messaging;
pub use messaging::{MessagingError, deep_link, normalize_phone};
pub use reqwest::Url;
