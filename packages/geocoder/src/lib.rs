#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoding service for temple addresses.
//!
//! Resolves free-text postal addresses to coordinates through the public
//! Nominatim / `OpenStreetMap` search endpoint, configured via TOML files in
//! `services/`. The public instance allows **1 request per second**, so
//! callers pace requests with a [`rate_limit::RateLimiter`] built from the
//! service's `rate_limit_ms`.
//!
//! Also provides [`address::sanitize_address`] for stripping template
//! leftovers from addresses before they are sent.

pub mod address;
pub mod nominatim;
pub mod rate_limit;
pub mod service_registry;

use async_trait::async_trait;
use temple_map_temple_models::Coordinates;
use thiserror::Error;

/// A geocoding result.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedAddress {
    /// Resolved location.
    pub coordinates: Coordinates,
    /// The matched/canonical address returned by the geocoder.
    pub matched_address: Option<String>,
}

/// Errors from geocoding operations.
///
/// Callers in the ingestion pipeline treat every variant the same way as
/// an empty result: the temple simply stays without coordinates.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Geocoder returned HTTP {status}")]
    Status {
        /// Response status.
        status: reqwest::StatusCode,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Nothing was left to look up after sanitizing.
    #[error("Address is empty")]
    EmptyAddress,
}

/// Resolves an address to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Short provider name for log messages.
    fn name(&self) -> &str;

    /// Looks up a free-text address. `Ok(None)` means the provider had no
    /// match.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the request or response parsing fails.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>, GeocodeError>;
}
