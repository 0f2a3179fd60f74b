#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical temple directory types.
//!
//! Every temple source (static files, `GeoJSON`, the Overpass API) is
//! normalized into [`Temple`] records. Coordinates are optional: a temple
//! without valid coordinates stays in the directory listing but is never
//! plotted on the map.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Display name used when a source record has no name.
pub const DEFAULT_NAME: &str = "Unnamed Temple";

/// State used when a source record has no state.
pub const DEFAULT_STATE: &str = "Unknown";

/// Image shown for temples that do not carry their own picture.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=300";

/// Base URL for coordinate-based Google Maps links.
const GOOGLE_MAPS_COORDINATE_BASE: &str = "https://maps.google.com/?q=";

static GOOGLE_MAPS_SEARCH_BASE: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://www.google.com/maps/search/").expect("valid Google Maps search URL")
});

/// Coordinates outside the WGS84 range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
pub struct InvalidCoordinatesError {
    /// The rejected latitude.
    pub latitude: f64,
    /// The rejected longitude.
    pub longitude: f64,
}

/// A WGS84 latitude/longitude pair.
///
/// Fields are public so records can round-trip through JSON unchanged;
/// anything that renders a map must go through [`Coordinates::is_valid`]
/// (or [`Temple::plottable_coordinates`]) first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude in degrees, `-90..=90`.
    pub latitude: f64,
    /// Longitude in degrees, `-180..=180`.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair, rejecting non-finite or out-of-range
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinatesError`] if either value is outside its
    /// WGS84 range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinatesError> {
        let coordinates = Self {
            latitude,
            longitude,
        };
        if coordinates.is_valid() {
            Ok(coordinates)
        } else {
            Err(InvalidCoordinatesError {
                latitude,
                longitude,
            })
        }
    }

    /// Builds coordinates from two optional source values.
    ///
    /// Returns `None` if either value is missing, out of range, or the pair
    /// is exactly `(0, 0)`, which sources use as a "no location" marker.
    #[must_use]
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        let latitude = latitude?;
        let longitude = longitude?;
        if latitude == 0.0 && longitude == 0.0 {
            return None;
        }
        Self::new(latitude, longitude).ok()
    }

    /// Whether both values are finite and inside their WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A street address split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAddress {
    /// Street line, including the house number when known.
    pub street: Option<String>,
    /// City or town.
    pub city: Option<String>,
    /// State name or abbreviation.
    pub state: Option<String>,
    /// ZIP code.
    pub postal_code: Option<String>,
}

/// A temple address.
///
/// Flat sources carry a single formatted line; `GeoJSON`, Overpass, and
/// nested resource sources carry the parts separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    /// A single pre-formatted address line.
    Formatted(String),
    /// Street, city, state, and postal code fields.
    Structured(StructuredAddress),
}

impl Default for Address {
    fn default() -> Self {
        Self::Formatted(String::new())
    }
}

impl Address {
    /// Returns the address as one line, joining the non-empty structured
    /// fields with `", "`.
    #[must_use]
    pub fn formatted(&self) -> String {
        match self {
            Self::Formatted(line) => line.trim().to_string(),
            Self::Structured(parts) => [
                parts.street.as_deref(),
                parts.city.as_deref(),
                parts.state.as_deref(),
                parts.postal_code.as_deref(),
            ]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        }
    }

    /// Whether the address has no usable text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formatted().is_empty()
    }
}

/// One directory entry: a Hindu temple in the United States.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Temple {
    /// Identifier, unique within a loaded collection.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Postal address.
    #[serde(default)]
    pub address: Address,
    /// Free-text state name or code, used as a filter key.
    pub state: String,
    /// Location, absent until geocoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Temple website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Opening hours as published by the temple.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_open: Option<String>,
    /// Image path or URL.
    pub image: String,
    /// Link to an external detail page.
    #[serde(default, rename = "detailURL", skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
    /// Tradition or sampradaya, when the source records one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denomination: Option<String>,
    /// Derived link; see [`google_maps_link`].
    pub google_maps_link: String,
}

impl Temple {
    /// Creates a temple with every optional field defaulted and the Google
    /// Maps link derived from `address` and `coordinates`.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: Address,
        state: impl Into<String>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        let mut temple = Self {
            id: id.into(),
            name: name.into(),
            address,
            state: state.into(),
            coordinates,
            website: None,
            phone: None,
            hours_open: None,
            image: PLACEHOLDER_IMAGE.to_string(),
            detail_url: None,
            denomination: None,
            google_maps_link: String::new(),
        };
        temple.refresh_google_maps_link();
        temple
    }

    /// The address as a single line.
    #[must_use]
    pub fn formatted_address(&self) -> String {
        self.address.formatted()
    }

    /// Coordinates that are safe to plot, or `None`.
    #[must_use]
    pub fn plottable_coordinates(&self) -> Option<Coordinates> {
        self.coordinates.filter(Coordinates::is_valid)
    }

    /// Whether this temple may be drawn as a map marker.
    #[must_use]
    pub fn is_plottable(&self) -> bool {
        self.plottable_coordinates().is_some()
    }

    /// Sets the coordinates and recomputes the Google Maps link.
    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = Some(coordinates);
        self.refresh_google_maps_link();
    }

    /// Recomputes [`Temple::google_maps_link`] from the current address and
    /// coordinates.
    pub fn refresh_google_maps_link(&mut self) {
        self.google_maps_link = google_maps_link(self.coordinates, &self.formatted_address());
    }
}

/// Builds a Google Maps link for a temple.
///
/// With coordinates the link is `https://maps.google.com/?q=<lat>,<lon>`;
/// otherwise it is a search URL for the formatted address.
#[must_use]
pub fn google_maps_link(coordinates: Option<Coordinates>, address: &str) -> String {
    if let Some(c) = coordinates {
        return format!(
            "{GOOGLE_MAPS_COORDINATE_BASE}{},{}",
            c.latitude, c.longitude
        );
    }

    let mut url = GOOGLE_MAPS_SEARCH_BASE.clone();
    url.query_pairs_mut()
        .append_pair("api", "1")
        .append_pair("query", address);
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_reject_out_of_range() {
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.5).is_err());
        assert!(Coordinates::new(f64::NAN, 10.0).is_err());
        assert!(Coordinates::new(33.8896, -84.143).is_ok());
    }

    #[test]
    fn from_parts_treats_null_island_as_missing() {
        assert!(Coordinates::from_parts(Some(0.0), Some(0.0)).is_none());
        assert!(Coordinates::from_parts(Some(40.0), None).is_none());
        assert!(Coordinates::from_parts(Some(40.0), Some(-74.0)).is_some());
    }

    #[test]
    fn structured_address_skips_blank_parts() {
        let address = Address::Structured(StructuredAddress {
            street: Some("460 Rockbridge Rd NW".to_string()),
            city: Some("Lilburn".to_string()),
            state: Some("  ".to_string()),
            postal_code: Some("30047".to_string()),
        });
        assert_eq!(address.formatted(), "460 Rockbridge Rd NW, Lilburn, 30047");
    }

    #[test]
    fn link_uses_coordinates_when_present() {
        let coords = Coordinates::new(33.8896, -84.143).unwrap();
        assert_eq!(
            google_maps_link(Some(coords), "ignored"),
            "https://maps.google.com/?q=33.8896,-84.143"
        );
    }

    #[test]
    fn link_falls_back_to_address_search() {
        let link = google_maps_link(None, "1 Temple Rd, Austin, TX");
        assert!(link.starts_with("https://www.google.com/maps/search/?api=1&query="));
        assert!(link.contains("Temple+Rd"));
    }

    #[test]
    fn invalid_coordinates_are_not_plottable() {
        let temple = Temple::new(
            "t1",
            "Broken",
            Address::default(),
            "Texas",
            Some(Coordinates {
                latitude: 120.0,
                longitude: 0.0,
            }),
        );
        assert!(!temple.is_plottable());
        // Serialization must not fail on bad coordinates.
        assert!(serde_json::to_string(&temple).is_ok());
    }

    #[test]
    fn set_coordinates_refreshes_link() {
        let mut temple = Temple::new("t1", "Mandir", Address::default(), "Ohio", None);
        temple.set_coordinates(Coordinates::new(39.96, -83.0).unwrap());
        assert_eq!(temple.google_maps_link, "https://maps.google.com/?q=39.96,-83");
    }

    #[test]
    fn address_deserializes_both_shapes() {
        let flat: Address = serde_json::from_str("\"12 Main St\"").unwrap();
        assert_eq!(flat, Address::Formatted("12 Main St".to_string()));

        let structured: Address =
            serde_json::from_str(r#"{"street":"12 Main St","city":"Edison"}"#).unwrap();
        assert_eq!(structured.formatted(), "12 Main St, Edison");
    }
}
