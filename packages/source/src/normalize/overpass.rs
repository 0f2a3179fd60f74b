//! Overpass API responses for `amenity=place_of_worship` + `religion=hindu`.
//!
//! Nodes carry `lat`/`lon` directly; ways and relations queried with
//! `out center` carry a `center` object instead.

use serde_json::Value;
use temple_map_temple_models::{Address, Coordinates, StructuredAddress};

use super::Draft;
use crate::parsing;

/// Returns `elements`.
#[must_use]
pub fn records(payload: &Value) -> Option<&Vec<Value>> {
    payload.get("elements").and_then(Value::as_array)
}

/// Reads one element.
#[must_use]
pub fn draft(element: &Value) -> Draft {
    let tags = element.get("tags").unwrap_or(&Value::Null);

    let id = match (
        parsing::text(element, &["type"]),
        parsing::text(element, &["id"]),
    ) {
        (Some(kind), Some(id)) => Some(format!("{kind}/{id}")),
        (None, id) => id,
        (Some(_), None) => None,
    };

    Draft {
        id,
        name: parsing::text(tags, &["name", "name:en"]),
        address: address(tags),
        state: parsing::text(tags, &["addr:state"]),
        coordinates: position(element),
        website: parsing::text(tags, &["website", "contact:website"]),
        phone: parsing::text(tags, &["phone", "contact:phone"]),
        hours_open: parsing::text(tags, &["opening_hours"]),
        image: parsing::text(tags, &["image"]),
        detail_url: None,
        denomination: parsing::text(tags, &["denomination"]),
        google_maps_link: None,
    }
}

fn address(tags: &Value) -> Address {
    let street = match (
        parsing::text(tags, &["addr:housenumber"]),
        parsing::text(tags, &["addr:street"]),
    ) {
        (Some(number), Some(street)) => Some(format!("{number} {street}")),
        (number, street) => street.or(number),
    };

    Address::Structured(StructuredAddress {
        street,
        city: parsing::text(tags, &["addr:city"]),
        state: parsing::text(tags, &["addr:state"]),
        postal_code: parsing::text(tags, &["addr:postcode"]),
    })
}

fn position(element: &Value) -> Option<Coordinates> {
    parsing::coordinates(element).or_else(|| parsing::coordinates(element.get("center")?))
}
