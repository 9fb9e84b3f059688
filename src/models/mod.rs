//! Data models for questionnaire submissions.

pub mod survey;

pub use survey::{Contact, SurveyInput};
