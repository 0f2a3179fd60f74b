//! `GeoJSON` `FeatureCollection` records.
//!
//! Point geometry is `[lon, lat]`; everything else lives in `properties`.

use serde_json::Value;
use temple_map_temple_models::Coordinates;

use super::Draft;
use crate::parsing;

/// Returns `features`.
#[must_use]
pub fn records(payload: &Value) -> Option<&Vec<Value>> {
    payload.get("features").and_then(Value::as_array)
}

/// Reads one feature.
#[must_use]
pub fn draft(feature: &Value) -> Draft {
    let props = feature.get("properties").unwrap_or(&Value::Null);

    Draft {
        id: parsing::id(props).or_else(|| parsing::id(feature)),
        name: parsing::text(props, &["name"]),
        address: parsing::address(props.get("address")),
        state: parsing::text(props, &["state"]),
        coordinates: point(feature).or_else(|| parsing::coordinates(props)),
        website: parsing::text(props, &["website"]),
        phone: parsing::text(props, &["phone"]),
        hours_open: parsing::text(props, &["hoursOpen", "opening_hours"]),
        image: parsing::text(props, &["image"]),
        detail_url: parsing::text(props, &["detailURL"]),
        denomination: parsing::text(props, &["denomination"]),
        google_maps_link: None,
    }
}

/// Reads `geometry.coordinates` as `[lon, lat]`.
fn point(feature: &Value) -> Option<Coordinates> {
    let coords = feature.get("geometry")?.get("coordinates")?.as_array()?;
    let lon = coords.first()?.as_f64();
    let lat = coords.get(1)?.as_f64();
    Coordinates::from_parts(lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_point_feature() {
        let feature = json!({
            "type": "Feature",
            "properties": {
                "id": "node/123",
                "name": "BAPS Shri Swaminarayan Mandir",
                "address": { "street": "460 Rockbridge Rd NW", "city": "Lilburn",
                             "state": "GA", "postcode": "30047" },
                "denomination": "Swaminarayan"
            },
            "geometry": { "type": "Point", "coordinates": [-84.143, 33.8896] }
        });

        let draft = draft(&feature);
        let coords = draft.coordinates.unwrap();
        assert!((coords.latitude - 33.8896).abs() < f64::EPSILON);
        assert!((coords.longitude - -84.143).abs() < f64::EPSILON);
        assert_eq!(draft.id.as_deref(), Some("node/123"));
        assert_eq!(draft.denomination.as_deref(), Some("Swaminarayan"));
    }

    #[test]
    fn missing_geometry_leaves_coordinates_empty() {
        let draft = draft(&json!({ "type": "Feature", "properties": { "name": "X" } }));
        assert!(draft.coordinates.is_none());
    }
}
