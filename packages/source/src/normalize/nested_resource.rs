//! Directory exports that wrap each temple in a `resource` object.
//!
//! ```json
//! { "resource": { "id": "...", "name": "...",
//!   "physicalAddress": { "street1": "...", "city": "...", "state": "...", "postalCode": "..." },
//!   "contact": { "website": "...", "phone": "..." } } }
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

/// Reads one record, unwrapping `resource` when present.
#[must_use]
pub fn draft(record: &Value) -> Draft {
    let resource = record.get("resource").unwrap_or(record);
    let contact = resource.get("contact").unwrap_or(&Value::Null);
    let address = resource
        .get("physicalAddress")
        .or_else(|| resource.get("address"));

    Draft {
        id: parsing::id(resource),
        name: parsing::text(resource, &["name"]),
        address: parsing::address(address),
        state: address.and_then(|a| parsing::text(a, &["state"])),
        coordinates: parsing::coordinates(resource),
        website: parsing::text(contact, &["website"])
            .or_else(|| parsing::text(resource, &["website"])),
        phone: parsing::text(contact, &["phone"]).or_else(|| parsing::text(resource, &["phone"])),
        hours_open: parsing::text(resource, &["hoursOpen"]),
        image: parsing::text(resource, &["image"]),
        detail_url: parsing::text(resource, &["detailURL", "detailUrl"]),
        denomination: parsing::text(resource, &["denomination"]),
        google_maps_link: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_nested_fields() {
        let record = json!({ "resource": {
            "id": "r-1",
            "name": "Hindu Temple of Greater Chicago",
            "physicalAddress": {
                "street1": "10915 Lemont Rd",
                "city": "Lemont",
                "state": "Illinois",
                "postalCode": "60439"
            },
            "contact": { "website": "https://ramatemple.org", "phone": "630-972-0300" }
        }});

        let draft = draft(&record);
        assert_eq!(draft.id.as_deref(), Some("r-1"));
        assert_eq!(draft.state.as_deref(), Some("Illinois"));
        assert_eq!(
            draft.address.formatted(),
            "10915 Lemont Rd, Lemont, Illinois, 60439"
        );
        assert_eq!(draft.website.as_deref(), Some("https://ramatemple.org"));
    }

    #[test]
    fn tolerates_missing_nested_objects() {
        let draft = draft(&json!({ "resource": { "name": "Only a name" } }));
        assert_eq!(draft.name.as_deref(), Some("Only a name"));
        assert!(draft.address.is_empty());
        assert!(draft.state.is_none());
        assert!(draft.phone.is_none());
    }
}
