//! Flat JSON records: one object per temple with top-level fields.
//!
//! ```json
//! { "id": "1", "name": "...", "address": "460 Rockbridge Rd NW, Lilburn, GA 30047",
//!   "state": "Georgia", "latitude": 33.8896, "longitude": -84.143 }
//! ```

use serde_json::Value;

use super::Draft;
use crate::parsing;

/// Accepts a bare array or `{ "temples": [...] }`.
#[must_use]
pub fn records(payload: &Value) -> Option<&Vec<Value>> {
    payload
        .as_array()
        .or_else(|| payload.get("temples").and_then(Value::as_array))
}

/// Reads one flat record.
#[must_use]
pub fn draft(record: &Value) -> Draft {
    Draft {
        id: parsing::id(record),
        name: parsing::text(record, &["name"]),
        address: parsing::address(record.get("address")),
        state: parsing::text(record, &["state"]),
        coordinates: parsing::coordinates(record),
        website: parsing::text(record, &["website"]),
        phone: parsing::text(record, &["phone"]),
        hours_open: parsing::text(record, &["hoursOpen", "hours"]),
        image: parsing::text(record, &["image"]),
        detail_url: parsing::text(record, &["detailURL", "detailUrl"]),
        denomination: parsing::text(record, &["denomination"]),
        google_maps_link: parsing::text(record, &["googleMapsLink"]),
    }
}
