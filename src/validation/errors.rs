//! Collected schema violations.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// All schema violations found in one submission.
///
/// Field errors are keyed by field name (`contact.email` for nested contact
/// fields); messages for a field keep the order in which the rules ran.
/// Form errors are not attributable to a single field.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub field_errors: BTreeMap<String, Vec<String>>,
    pub form_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Record a message that concerns the whole form.
    pub fn add_form_error(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.form_errors.is_empty()
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.form_errors.len() + self.field_errors.values().map(Vec::len).sum::<usize>()
    }

    /// Messages recorded for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.field_errors.get(field).map(Vec::as_slice)
    }

    /// Every message, form errors first, then field errors by field name.
    pub fn messages(&self) -> Vec<&str> {
        self.form_errors
            .iter()
            .chain(self.field_errors.values().flatten())
            .map(String::as_str)
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.len())?;
        for message in &self.form_errors {
            write!(f, "; {}", message)?;
        }
        for (field, messages) in &self.field_errors {
            for message in messages {
                write!(f, "; {}: {}", field, message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
