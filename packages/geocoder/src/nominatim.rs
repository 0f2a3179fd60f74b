//! Nominatim / `OpenStreetMap` geocoder client.
//!
//! Nominatim has strict rate limits: **1 request per second** maximum on
//! the public instance. This client sends exactly one request per lookup;
//! pacing is the caller's job.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use async_trait::async_trait;
use temple_map_temple_models::Coordinates;

use crate::address::sanitize_address;
use crate::{GeocodeError, GeocodedAddress, Geocoder};

/// Free-form Nominatim search client.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
    country_codes: Option<String>,
}

impl NominatimGeocoder {
    /// Creates a client for `base_url` (e.g.,
    /// `"https://nominatim.openstreetmap.org/search"`).
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, country_codes: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            country_codes: country_codes.map(str::to_string),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    fn name(&self) -> &str {
        "nominatim"
    }

    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, GeocodeError> {
        let query = sanitize_address(address).ok_or(GeocodeError::EmptyAddress)?;

        let mut params = vec![("q", query.as_str()), ("format", "json"), ("limit", "1")];
        if let Some(codes) = self.country_codes.as_deref() {
            params.push(("countrycodes", codes));
        }

        let resp = self.client.get(&self.base_url).query(&params).send().await?;
        if !resp.status().is_success() {
            return Err(GeocodeError::Status {
                status: resp.status(),
            });
        }

        let body: serde_json::Value = resp.json().await?;
        parse_response(&body)
    }
}

/// Parses a Nominatim JSON response. Only the first candidate is used.
///
/// # Errors
///
/// Returns [`GeocodeError::Parse`] if the body is not an array or the first
/// candidate lacks a usable `lat`/`lon`.
pub fn parse_response(body: &serde_json::Value) -> Result<Option<GeocodedAddress>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let lat = coordinate(&first["lat"]).ok_or_else(|| GeocodeError::Parse {
        message: "Missing lat in Nominatim response".to_string(),
    })?;
    let lon = coordinate(&first["lon"]).ok_or_else(|| GeocodeError::Parse {
        message: "Missing lon in Nominatim response".to_string(),
    })?;

    let coordinates = Coordinates::new(lat, lon).map_err(|e| GeocodeError::Parse {
        message: e.to_string(),
    })?;

    Ok(Some(GeocodedAddress {
        coordinates,
        matched_address: first["display_name"].as_str().map(String::from),
    }))
}

/// Nominatim returns coordinates as strings; some mirrors use numbers.
fn coordinate(value: &serde_json::Value) -> Option<f64> {
    value
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .or_else(|| value.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nominatim_result() {
        let body = serde_json::json!([{
            "lat": "33.8896",
            "lon": "-84.1430",
            "display_name": "BAPS Shri Swaminarayan Mandir, Lilburn, Georgia, USA"
        }]);
        let result = parse_response(&body).unwrap().unwrap();
        assert!((result.coordinates.latitude - 33.8896).abs() < 1e-4);
        assert!((result.coordinates.longitude - -84.143).abs() < 1e-4);
        assert!(result.matched_address.unwrap().contains("Lilburn"));
    }

    #[test]
    fn parses_nominatim_empty() {
        let body = serde_json::json!([]);
        assert!(parse_response(&body).unwrap().is_none());
    }

    #[test]
    fn uses_only_first_candidate() {
        let body = serde_json::json!([
            { "lat": "29.5", "lon": "-95.3" },
            { "lat": "40.0", "lon": "-74.0" }
        ]);
        let result = parse_response(&body).unwrap().unwrap();
        assert!((result.coordinates.latitude - 29.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_array_body() {
        let body = serde_json::json!({ "error": "rate limited" });
        assert!(matches!(
            parse_response(&body),
            Err(GeocodeError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_candidate() {
        let body = serde_json::json!([{ "lat": "123.0", "lon": "10.0" }]);
        assert!(parse_response(&body).is_err());
    }

    #[tokio::test]
    async fn empty_address_fails_before_any_request() {
        let geocoder = NominatimGeocoder::new(reqwest::Client::new(), "http://127.0.0.1:9", None);
        let err = geocoder.geocode("{{address}}").await.unwrap_err();
        assert!(matches!(err, GeocodeError::EmptyAddress));
    }
}
