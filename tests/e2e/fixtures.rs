//! Sample questionnaire payloads.

use serde_json::{json, Value};

/// A complete, valid submission without contact details.
pub fn valid_payload() -> Value {
    json!({
        "propertyType": "Einfamilienhaus",
        "orientations": ["Süd", "West"],
        "roofAge": "Unter 5 Jahre",
        "annualConsumption": "3.000–5.000 kWh",
        "interestedInOtherSolutions": "Ja"
    })
}

/// The valid payload with one top-level field replaced.
pub fn payload_with(field: &str, value: Value) -> Value {
    let mut payload = valid_payload();
    payload[field] = value;
    payload
}

/// The valid payload with one top-level field removed.
#[allow(dead_code)]
pub fn payload_without(field: &str) -> Value {
    let mut payload = valid_payload();
    if let Some(record) = payload.as_object_mut() {
        record.remove(field);
    }
    payload
}
