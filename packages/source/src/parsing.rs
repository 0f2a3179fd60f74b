//! Shared field readers for raw temple records.
//!
//! Raw records come from hand-maintained files and crowd-sourced map data,
//! so every reader tolerates missing paths, `null`, blank strings, and
//! numbers encoded as strings.

use serde_json::Value;
use temple_map_temple_models::{Address, Coordinates, StructuredAddress};

/// Returns the first non-blank text value among `keys`.
///
/// Numbers are accepted and rendered as text (postal codes and phone
/// numbers are sometimes stored numerically).
#[must_use]
pub fn text(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match record.get(*key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Returns the first numeric value among `keys`, parsing strings.
#[must_use]
pub fn number(record: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| match record.get(*key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Reads a record identifier, which may be a string or a number.
#[must_use]
pub fn id(record: &Value) -> Option<String> {
    text(record, &["id", "_id"])
}

/// Reads latitude/longitude using any of the spellings sources use.
#[must_use]
pub fn coordinates(record: &Value) -> Option<Coordinates> {
    Coordinates::from_parts(
        number(record, &["latitude", "lat"]),
        number(record, &["longitude", "lng", "lon"]),
    )
}

/// Parses an address that may be a formatted string or an object.
///
/// A missing or `null` address yields an empty formatted address.
#[must_use]
pub fn address(value: Option<&Value>) -> Address {
    match value {
        Some(Value::String(line)) => Address::Formatted(line.trim().to_string()),
        Some(obj @ Value::Object(_)) => Address::Structured(structured_address(obj)),
        _ => Address::default(),
    }
}

/// Parses the object form of an address.
#[must_use]
pub fn structured_address(obj: &Value) -> StructuredAddress {
    let street = match (
        text(obj, &["street1", "street", "line1"]),
        text(obj, &["street2", "line2"]),
    ) {
        (Some(line1), Some(line2)) => Some(format!("{line1} {line2}")),
        (line1, line2) => line1.or(line2),
    };

    StructuredAddress {
        street,
        city: text(obj, &["city"]),
        state: text(obj, &["state"]),
        postal_code: text(obj, &["postalCode", "postcode", "zip", "postal_code"]),
    }
}
