//! PhoneNumber value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// Whitespace as browsers define it for `\s`: the Unicode spaces plus the
/// byte-order mark U+FEFF, without NEL U+0085.
const WHITESPACE: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static PHONE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\+?[0-9{}\-().]{{7,}}$", WHITESPACE)).expect("phone pattern is valid")
});

/// A type-safe wrapper for phone numbers.
///
/// The check is deliberately permissive: an optional leading '+', then at
/// least seven characters drawn from digits, whitespace, hyphens,
/// parentheses and periods.
///
/// # Example
///
/// ```
/// use solar_check::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+49 30 1234567").unwrap();
/// assert_eq!(phone.as_str(), "+49 30 1234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the phone format is invalid.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();

        if !PHONE_SHAPE.is_match(&phone) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(phone))
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
