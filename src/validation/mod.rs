//! Questionnaire schema validation.
//!
//! [`validate`] checks an untyped JSON record against the questionnaire
//! schema and either builds a [`SurveyInput`] or reports every violated rule
//! at once. Rules never short-circuit across fields.

mod errors;
mod payload;

pub use errors::ValidationErrors;
pub use payload::parse_payload;

use crate::domain::{
    invalid_option_message, AnnualConsumption, ContactName, EmailAddress, OptionSet, Orientation,
    OtherSolutions, PhoneNumber, PropertyType, RoofAge, ValidationError,
};
use crate::models::{Contact, SurveyInput};
use serde_json::{Map, Value};
use tracing::debug;

/// Wire names of the top-level fields.
pub mod fields {
    pub const PROPERTY_TYPE: &str = "propertyType";
    pub const ORIENTATIONS: &str = "orientations";
    pub const ROOF_AGE: &str = "roofAge";
    pub const ANNUAL_CONSUMPTION: &str = "annualConsumption";
    pub const INTERESTED_IN_OTHER_SOLUTIONS: &str = "interestedInOtherSolutions";
    pub const CONTACT: &str = "contact";
}

pub const REQUIRED_MESSAGE: &str = "Required";
pub const EMPTY_ORIENTATIONS_MESSAGE: &str = "Mindestens eine Dachausrichtung wählen";
pub const EXCLUSIVE_NO_ANSWER_MESSAGE: &str =
    "\"Keine Angabe\" darf nicht mit anderen Optionen kombiniert werden";

/// Validate an untyped submission.
///
/// # Errors
///
/// Returns every schema violation found. A non-object input yields a single
/// form-level error and no field errors.
pub fn validate(raw: &Value) -> Result<SurveyInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(record) = raw.as_object() else {
        errors.add_form_error(type_mismatch("object", raw));
        return Err(errors);
    };

    let property_type = option_field::<PropertyType>(record, fields::PROPERTY_TYPE, &mut errors);
    let orientations = orientations_field(record, &mut errors);
    let roof_age = option_field::<RoofAge>(record, fields::ROOF_AGE, &mut errors);
    let annual_consumption =
        option_field::<AnnualConsumption>(record, fields::ANNUAL_CONSUMPTION, &mut errors);
    let interested_in_other_solutions = option_field::<OtherSolutions>(
        record,
        fields::INTERESTED_IN_OTHER_SOLUTIONS,
        &mut errors,
    );
    let contact = contact_field(record, &mut errors);

    // Every helper that yields None has recorded at least one error.
    let (
        Some(property_type),
        Some(orientations),
        Some(roof_age),
        Some(annual_consumption),
        Some(interested_in_other_solutions),
        true,
    ) = (
        property_type,
        orientations,
        roof_age,
        annual_consumption,
        interested_in_other_solutions,
        errors.is_empty(),
    )
    else {
        debug!(error_count = errors.len(), "Submission rejected");
        return Err(errors);
    };

    debug!("Submission passed validation");
    Ok(SurveyInput {
        property_type,
        orientations,
        roof_age,
        annual_consumption,
        interested_in_other_solutions,
        contact,
    })
}

/// JSON kind name used in type-mismatch messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_mismatch(expected: &str, received: &Value) -> String {
    format!("Expected {}, received {}", expected, kind_of(received))
}

/// Parse one option value, returning the message to report on failure.
fn parse_option<T: OptionSet>(value: &Value) -> Result<T, String> {
    match value {
        Value::String(label) => {
            T::from_label(label).ok_or_else(|| invalid_option_message::<T>(label))
        }
        other => Err(type_mismatch(&T::expected_labels(), other)),
    }
}

fn required<'a>(
    record: &'a Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a Value> {
    let value = record.get(field);
    if value.is_none() {
        errors.add_field_error(field, REQUIRED_MESSAGE);
    }
    value
}

fn option_field<T: OptionSet>(
    record: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let value = required(record, field, errors)?;
    parse_option::<T>(value)
        .map_err(|message| errors.add_field_error(field, message))
        .ok()
}

/// Orientation set membership, non-emptiness and the exclusivity of
/// "Keine Angabe" are checked together here.
fn orientations_field(
    record: &Map<String, Value>,
    errors: &mut ValidationErrors,
) -> Option<Vec<Orientation>> {
    let field = fields::ORIENTATIONS;
    let value = required(record, field, errors)?;

    let Some(items) = value.as_array() else {
        errors.add_field_error(field, type_mismatch("array", value));
        return None;
    };

    let mut orientations = Vec::with_capacity(items.len());
    let mut all_members = true;
    for item in items {
        match parse_option::<Orientation>(item) {
            Ok(orientation) => orientations.push(orientation),
            Err(message) => {
                errors.add_field_error(field, message);
                all_members = false;
            }
        }
    }

    if items.is_empty() {
        errors.add_field_error(field, EMPTY_ORIENTATIONS_MESSAGE);
        return None;
    }

    if !all_members {
        return None;
    }

    // Length, not distinct count: a repeated sentinel is rejected too.
    if orientations.len() > 1 && orientations.iter().any(|o| o.is_no_answer()) {
        errors.add_field_error(field, EXCLUSIVE_NO_ANSWER_MESSAGE);
        return None;
    }

    Some(orientations)
}

fn contact_field(record: &Map<String, Value>, errors: &mut ValidationErrors) -> Option<Contact> {
    let value = record.get(fields::CONTACT)?;

    let Some(contact) = value.as_object() else {
        errors.add_field_error(fields::CONTACT, type_mismatch("object", value));
        return None;
    };

    Some(Contact {
        name: contact_subfield(contact, "name", |s| ContactName::new(s), errors),
        email: contact_subfield(contact, "email", |s| EmailAddress::new(s), errors),
        phone: contact_subfield(contact, "phone", |s| PhoneNumber::new(s), errors),
    })
}

fn contact_subfield<T>(
    contact: &Map<String, Value>,
    key: &str,
    build: fn(String) -> Result<T, ValidationError>,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let value = contact.get(key)?;
    let path = format!("{}.{}", fields::CONTACT, key);

    let Some(text) = value.as_str() else {
        errors.add_field_error(path, type_mismatch("string", value));
        return None;
    };

    build(text.to_string())
        .map_err(|err| errors.add_field_error(path, err.to_string()))
        .ok()
}
