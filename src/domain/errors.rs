//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
///
/// The `Display` strings are the user-facing messages returned to the
/// questionnaire client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided contact name is empty.
    EmptyName,

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is invalid.
    InvalidPhone(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name darf nicht leer sein"),
            Self::InvalidEmail(_) => write!(f, "Ungültige E-Mail"),
            Self::InvalidPhone(_) => write!(f, "Ungültige Telefonnummer"),
        }
    }
}

impl std::error::Error for ValidationError {}
