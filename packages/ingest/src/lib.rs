#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for loading the temple directory from a configured source.
//!
//! The pipeline runs once per load: fetch the raw payload, normalize every
//! record, then geocode temples that lack coordinates one at a time, paced
//! by a [`RateLimiter`]. A failed load never leaves the caller without
//! data: [`load_directory`] falls back to [`fallback::sample_temples`].

pub mod config;
pub mod fallback;
pub mod interactive;

use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use temple_map_geocoder::{GeocodeError, Geocoder};
use temple_map_geocoder::address::sanitize_address;
use temple_map_geocoder::rate_limit::RateLimiter;
use temple_map_source::progress::{ProgressCallback, percent_complete};
use temple_map_source::{SourceError, TempleSource};
use temple_map_temple_models::Temple;

/// Errors that abort an ingestion run.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The source could not be fetched or held no usable records.
    #[error("Temple source unavailable: {0}")]
    Source(#[from] SourceError),

    /// The geocoding client could not be built.
    #[error("Geocoder unavailable: {0}")]
    Geocoder(#[from] GeocodeError),

    /// No geocoding service is enabled.
    #[error("No geocoding service is enabled")]
    NoGeocoder,
}

/// Per-run geocoding counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeSummary {
    /// Temples processed.
    pub total: u64,
    /// Temples that already had coordinates.
    pub already_located: u64,
    /// Temples resolved by the geocoder during this run.
    pub geocoded: u64,
    /// Temples left without coordinates.
    pub unresolved: u64,
}

impl GeocodeSummary {
    /// Temples that can be plotted after this run.
    #[must_use]
    pub const fn located(&self) -> u64 {
        self.already_located + self.geocoded
    }

    /// The user-facing completion notice.
    #[must_use]
    pub fn notice(&self) -> String {
        if self.unresolved == 0 {
            format!("All {} temples were successfully geocoded.", self.total)
        } else {
            format!(
                "{} of {} temples were successfully geocoded.",
                self.located(),
                self.total
            )
        }
    }
}

/// Result of [`load_directory`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOutcome {
    /// The canonical collection.
    pub temples: Vec<Temple>,
    /// Geocoding counts (all zero when the fallback set was used).
    pub summary: GeocodeSummary,
    /// Whether the built-in sample set replaced the source data.
    pub used_fallback: bool,
    /// Why the source could not be loaded, when `used_fallback` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Geocodes every temple that lacks plottable coordinates.
///
/// Temples are processed serially in input order. Before each lookup the
/// limiter is awaited; temples that already have coordinates, or whose
/// address is empty after sanitizing, make no request and do not wait.
/// Lookup failures and misses leave the temple without coordinates but
/// keep it in the output. Progress shows the temple being worked on, then
/// advances by one and reports `round(100 * completed / total)`.
pub async fn geocode_missing(
    temples: Vec<Temple>,
    geocoder: &dyn Geocoder,
    limiter: &mut RateLimiter,
    progress: &Arc<dyn ProgressCallback>,
) -> (Vec<Temple>, GeocodeSummary) {
    let total = temples.len() as u64;
    let mut summary = GeocodeSummary {
        total,
        ..GeocodeSummary::default()
    };
    let mut geocoded = Vec::with_capacity(temples.len());

    progress.set_total(total);

    for (index, mut temple) in temples.into_iter().enumerate() {
        progress.set_message(temple.name.clone());
        if temple.is_plottable() {
            summary.already_located += 1;
        } else if let Some(address) = sanitize_address(&temple.formatted_address()) {
            limiter.acquire().await;
            match geocoder.geocode(&address).await {
                Ok(Some(hit)) => {
                    log::debug!(
                        "Geocoded {} via {}: {:?}",
                        temple.name,
                        geocoder.name(),
                        hit.matched_address
                    );
                    temple.set_coordinates(hit.coordinates);
                    summary.geocoded += 1;
                }
                Ok(None) => {
                    log::warn!("No geocoding match for {} ({address})", temple.name);
                    summary.unresolved += 1;
                }
                Err(e) => {
                    log::warn!("Failed to geocode {} ({address}): {e}", temple.name);
                    summary.unresolved += 1;
                }
            }
        } else {
            log::warn!("{} has no address to geocode", temple.name);
            summary.unresolved += 1;
        }

        geocoded.push(temple);

        let completed = index as u64 + 1;
        progress.set_position(completed);
        progress.set_percent(percent_complete(completed, total));
    }

    (geocoded, summary)
}

/// Runs the full pipeline against `source`.
///
/// # Errors
///
/// Returns [`IngestError::Source`] if the payload cannot be fetched, is
/// malformed, or holds no records.
pub async fn ingest(
    source: &dyn TempleSource,
    geocoder: &dyn Geocoder,
    limiter: &mut RateLimiter,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<(Vec<Temple>, GeocodeSummary), IngestError> {
    let start = Instant::now();
    log::info!("Loading temples from {} ({})", source.name(), source.id());

    let temples = source.load().await?;

    log::info!(
        "Geocoding temple addresses ({} temples, {:?} between lookups)",
        temples.len(),
        limiter.min_interval()
    );
    let (temples, summary) = geocode_missing(temples, geocoder, limiter, progress).await;

    log::info!(
        "{}: {} (took {:.1}s)",
        source.id(),
        summary.notice(),
        start.elapsed().as_secs_f64()
    );
    Ok((temples, summary))
}

/// Runs the pipeline, substituting the built-in sample set on failure.
pub async fn load_directory(
    source: &dyn TempleSource,
    geocoder: &dyn Geocoder,
    limiter: &mut RateLimiter,
    progress: &Arc<dyn ProgressCallback>,
) -> IngestOutcome {
    match ingest(source, geocoder, limiter, progress).await {
        Ok((temples, summary)) => {
            progress.finish(summary.notice());
            IngestOutcome {
                temples,
                summary,
                used_fallback: false,
                error: None,
            }
        }
        Err(e) => {
            log::error!("Error loading temples: {e}. Using default data instead.");
            progress.finish_and_clear();
            IngestOutcome {
                temples: fallback::sample_temples(),
                summary: GeocodeSummary::default(),
                used_fallback: true,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Writes `value` as pretty JSON to `path`, or to stdout when `path` is
/// `None`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
