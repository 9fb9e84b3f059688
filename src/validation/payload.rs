//! Decoding of raw request bodies.

use crate::error::PayloadError;
use serde_json::Value;

/// Decode a request body into an untyped JSON value.
///
/// Any well-formed JSON document is accepted here, including non-objects;
/// shape checks belong to [`super::validate`].
pub fn parse_payload(body: &[u8]) -> Result<Value, PayloadError> {
    serde_json::from_slice(body).map_err(PayloadError::InvalidJson)
}
