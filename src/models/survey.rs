//! Validated questionnaire answers.

use crate::domain::{
    AnnualConsumption, ContactName, EmailAddress, Orientation, OtherSolutions, PhoneNumber,
    PropertyType, RoofAge,
};
use serde::Serialize;

/// Optional contact details left by the respondent.
///
/// Every field is independently optional; an empty `Contact` is valid.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ContactName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailAddress>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneNumber>,
}

impl Contact {
    /// Whether none of the contact fields were provided.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// A fully validated questionnaire submission.
///
/// Only produced by [`crate::validation::validate`], which guarantees that
/// `orientations` is non-empty and that the "no answer" orientation never
/// appears alongside another entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SurveyInput {
    pub property_type: PropertyType,

    pub orientations: Vec<Orientation>,

    pub roof_age: RoofAge,

    pub annual_consumption: AnnualConsumption,

    pub interested_in_other_solutions: OtherSolutions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

impl SurveyInput {
    /// Whether the respondent declined to state the roof orientation.
    pub fn orientation_unknown(&self) -> bool {
        self.orientations.iter().any(|o| o.is_no_answer())
    }
}
