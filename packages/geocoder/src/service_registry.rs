//! Compile-time registry of geocoding service configurations.
//!
//! Each geocoding provider is defined in a TOML file under `services/`.
//! The registry embeds these at compile time and exposes them via
//! [`all_services`] and [`enabled_services`].

use std::time::Duration;

use serde::Deserialize;

use crate::nominatim::NominatimGeocoder;
use crate::rate_limit::RateLimiter;
use crate::{GeocodeError, Geocoder};

/// A geocoding service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingService {
    /// Unique identifier (e.g., `"nominatim"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this service may be used.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Preference order; lower values are tried first.
    pub priority: u32,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Nominatim / `OpenStreetMap` geocoder.
    Nominatim {
        /// API base URL (e.g., `"https://nominatim.openstreetmap.org/search"`).
        base_url: String,
        /// Minimum delay between requests in milliseconds.
        rate_limit_ms: u64,
        /// Comma-separated ISO country codes to restrict matches to.
        #[serde(default)]
        country_codes: Option<String>,
        /// Per-request timeout in seconds.
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
        /// Identifying `User-Agent`; Nominatim's usage policy requires one.
        #[serde(default = "default_user_agent")]
        user_agent: String,
    },
}

const fn default_true() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("temple-map/", env!("CARGO_PKG_VERSION")).to_string()
}

impl GeocodingService {
    /// Returns the provider's base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match &self.provider {
            ProviderConfig::Nominatim { base_url, .. } => base_url,
        }
    }

    /// Minimum interval between requests to this provider.
    #[must_use]
    pub const fn rate_limit(&self) -> Duration {
        match &self.provider {
            ProviderConfig::Nominatim { rate_limit_ms, .. } => Duration::from_millis(*rate_limit_ms),
        }
    }

    /// Builds a [`RateLimiter`] honoring this provider's limit.
    #[must_use]
    pub const fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.rate_limit())
    }

    /// Builds a client for this provider.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn build(&self) -> Result<Box<dyn Geocoder>, GeocodeError> {
        match &self.provider {
            ProviderConfig::Nominatim {
                base_url,
                country_codes,
                timeout_secs,
                user_agent,
                ..
            } => {
                let client = reqwest::Client::builder()
                    .user_agent(user_agent.as_str())
                    .timeout(Duration::from_secs(*timeout_secs))
                    .build()?;
                Ok(Box::new(NominatimGeocoder::new(
                    client,
                    base_url,
                    country_codes.as_deref(),
                )))
            }
        }
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[("nominatim", include_str!("../services/nominatim.toml"))];

/// Returns all geocoding service configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<GeocodingService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse geocoding service '{name}': {e}"))
        })
        .collect()
}

/// Returns only enabled services, sorted by priority (ascending).
#[must_use]
pub fn enabled_services() -> Vec<GeocodingService> {
    let mut services: Vec<GeocodingService> =
        all_services().into_iter().filter(|s| s.enabled).collect();
    services.sort_by_key(|s| s.priority);
    services
}

/// Returns the highest-priority enabled service.
#[must_use]
pub fn default_service() -> Option<GeocodingService> {
    enabled_services().into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_services() {
        assert_eq!(all_services().len(), SERVICE_TOMLS.len());
    }

    #[test]
    fn service_ids_are_unique() {
        let mut seen = BTreeSet::new();
        for svc in &all_services() {
            assert!(seen.insert(svc.id.clone()), "Duplicate service ID: {}", svc.id);
        }
    }

    #[test]
    fn nominatim_respects_public_rate_limit() {
        let svc = default_service().unwrap();
        assert_eq!(svc.id, "nominatim");
        assert_eq!(svc.rate_limit(), Duration::from_millis(1000));
        assert!(!svc.base_url().is_empty());
    }

    #[test]
    fn nominatim_identifies_itself() {
        let svc = default_service().unwrap();
        let ProviderConfig::Nominatim { user_agent, .. } = &svc.provider;
        assert!(user_agent.starts_with("temple-map"));
    }

    #[test]
    fn user_agent_defaults_when_omitted() {
        let svc: GeocodingService = toml::de::from_str(
            r#"
            id = "local"
            name = "Local Nominatim"
            priority = 2

            [provider]
            type = "nominatim"
            base_url = "http://localhost:8080/search"
            rate_limit_ms = 0
            "#,
        )
        .unwrap();
        let ProviderConfig::Nominatim { user_agent, .. } = &svc.provider;
        assert_eq!(user_agent, &default_user_agent());
    }

    #[test]
    fn builds_geocoder() {
        let svc = default_service().unwrap();
        assert_eq!(svc.build().unwrap().name(), "nominatim");
    }
}
