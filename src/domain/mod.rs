//! Domain value objects and option sets.
//!
//! This module contains the closed option sets of the questionnaire and
//! type-safe wrappers for the optional contact details. Value objects
//! validate at construction time so invalid data cannot be represented.

pub mod email;
pub mod errors;
pub mod name;
pub mod options;
pub mod phone;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use name::ContactName;
pub use options::{
    invalid_option_message, AnnualConsumption, OptionSet, Orientation, OtherSolutions,
    PropertyType, RoofAge,
};
pub use phone::PhoneNumber;
