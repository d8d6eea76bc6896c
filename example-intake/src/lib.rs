//! The JernieFit client assessment built on the intake wizard.

pub mod client_assessment;
pub mod consts;
pub mod follow_up;

pub use client_assessment::{ClientAssessment, GOAL_OTHER};
pub use follow_up::{follow_up_link, greeting};
