//! Environment-driven pipeline configuration.

use std::path::PathBuf;
use std::sync::Arc;

use temple_map_geocoder::Geocoder;
use temple_map_geocoder::rate_limit::RateLimiter;
use temple_map_geocoder::service_registry::default_service;
use temple_map_source::ConfiguredSource;
use temple_map_source::progress::ProgressCallback;
use temple_map_source::registry::DEFAULT_SOURCE_ID;

use crate::{IngestError, IngestOutcome, load_directory};

/// Selects the source to load.
pub const SOURCE_ENV: &str = "TEMPLE_MAP_SOURCE";
/// Directory that file-backed sources resolve against.
pub const DATA_DIR_ENV: &str = "TEMPLE_MAP_DATA_DIR";
/// Overrides the geocoding service's minimum interval.
pub const RATE_LIMIT_ENV: &str = "GEOCODE_RATE_LIMIT_MS";

const DEFAULT_DATA_DIR: &str = "data";

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Registry id of the source to load.
    pub source_id: String,
    /// Base directory for file-backed sources.
    pub data_dir: PathBuf,
    /// Milliseconds between geocoding requests, overriding the service.
    pub rate_limit_ms: Option<u64>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source_id: DEFAULT_SOURCE_ID.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            rate_limit_ms: None,
        }
    }
}

impl IngestConfig {
    /// Reads settings from the environment, using defaults for anything
    /// unset. An unparsable rate limit is ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let rate_limit_ms = non_blank(RATE_LIMIT_ENV).and_then(|raw| {
            raw.trim()
                .parse()
                .inspect_err(|e| log::warn!("Ignoring {RATE_LIMIT_ENV}={raw}: {e}"))
                .ok()
        });

        Self {
            source_id: non_blank(SOURCE_ENV).unwrap_or(defaults.source_id),
            data_dir: non_blank(DATA_DIR_ENV).map_or(defaults.data_dir, PathBuf::from),
            rate_limit_ms,
        }
    }

    /// Builds the configured source.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Source`] if the source id is unknown or its
    /// HTTP client cannot be built.
    pub fn source(&self) -> Result<ConfiguredSource, IngestError> {
        Ok(ConfiguredSource::from_registry(
            &self.source_id,
            &self.data_dir,
        )?)
    }

    /// Builds the default geocoder and a limiter honoring its rate limit
    /// (or the configured override).
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::NoGeocoder`] if no service is enabled, or
    /// [`IngestError::Geocoder`] if its client cannot be built.
    pub fn geocoder(&self) -> Result<(Box<dyn Geocoder>, RateLimiter), IngestError> {
        let service = default_service().ok_or(IngestError::NoGeocoder)?;
        let limiter = self
            .rate_limit_ms
            .map_or_else(|| service.rate_limiter(), RateLimiter::from_millis);
        log::debug!(
            "Using geocoding service {} ({:?} between requests)",
            service.id,
            limiter.min_interval()
        );
        Ok((service.build()?, limiter))
    }

    /// Builds the pipeline and runs [`load_directory`].
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] only if the pipeline cannot be constructed.
    /// Load failures fall back to the sample set instead.
    pub async fn load(
        &self,
        progress: &Arc<dyn ProgressCallback>,
    ) -> Result<IngestOutcome, IngestError> {
        let source = self.source()?;
        let (geocoder, mut limiter) = self.geocoder()?;
        Ok(load_directory(&source, geocoder.as_ref(), &mut limiter, progress).await)
    }
}
