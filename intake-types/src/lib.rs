//! Core types for the intake wizard.
//!
//! This crate provides the foundational, presentation-agnostic types:
//! - `FieldDefinition` and `FieldKind` - The field registry
//! - `StepDefinition` and `FormDefinition` - The ordered step table
//! - `AnswerSet` and `AnswerValue` - The in-progress answers of one session
//! - `validation` - Per-field rules and step completeness
//! - `Submitter` - The seam for delivering a completed answer set

mod field_id;
pub use field_id::FieldId;

mod answer_value;
pub use answer_value::AnswerValue;

mod answers;
pub use answers::{AnswerError, AnswerSet};

mod requirement;
pub use requirement::{Condition, Requirement};

mod field;
pub use field::{
    BoolField, ChoiceField, ChoiceOption, DateField, FieldDefinition, FieldKind, FloatField,
    IntField, TextField, TextFormat,
};

mod step;
pub use step::StepDefinition;

mod form;
pub use form::{FormBuilder, FormDefinition};

pub mod validation;
pub use validation::{ValidationErrors, check_field, is_step_complete, validate_all};

mod error;
pub use error::{DefinitionError, SubmitError};

mod submit;
pub use submit::{IntakeForm, SubmitReceipt, Submitter};
