//! Raw record normalization.
//!
//! Each [`SourceKind`] has a module that knows where its records live in
//! the payload and how to read one record into a [`Draft`]. Defaults are
//! applied in one place, [`Draft::into_temple`], so every shape produces a
//! fully-populated [`Temple`].

pub mod flat_json;
pub mod geojson;
pub mod nested_resource;
pub mod overpass;

use std::collections::BTreeSet;

use serde_json::Value;
use temple_map_source_models::SourceKind;
use temple_map_temple_models::{
    Address, Coordinates, DEFAULT_NAME, DEFAULT_STATE, PLACEHOLDER_IMAGE, Temple,
};

use crate::SourceError;

/// Fields read from one raw record before defaults are applied.
#[derive(Debug, Default)]
pub struct Draft {
    /// Source-provided identifier.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Address in whichever form the source uses.
    pub address: Address,
    /// State, if the record names one outside its address.
    pub state: Option<String>,
    /// Source-provided location.
    pub coordinates: Option<Coordinates>,
    /// Website URL.
    pub website: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Opening hours.
    pub hours_open: Option<String>,
    /// Image path or URL.
    pub image: Option<String>,
    /// External detail page.
    pub detail_url: Option<String>,
    /// Tradition.
    pub denomination: Option<String>,
    /// Link supplied by the source, kept only when there are no coordinates
    /// to derive one from.
    pub google_maps_link: Option<String>,
}

impl Draft {
    /// Applies defaults and derives the Google Maps link.
    #[must_use]
    pub fn into_temple(self, fallback_id: String) -> Temple {
        let state = self
            .state
            .or_else(|| match &self.address {
                Address::Structured(parts) => parts.state.clone(),
                Address::Formatted(_) => None,
            })
            .unwrap_or_else(|| DEFAULT_STATE.to_string());

        let mut temple = Temple::new(
            self.id.unwrap_or(fallback_id),
            self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            self.address,
            state,
            self.coordinates,
        );
        temple.website = self.website;
        temple.phone = self.phone;
        temple.hours_open = self.hours_open;
        temple.image = self.image.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
        temple.detail_url = self.detail_url;
        temple.denomination = self.denomination;
        if temple.coordinates.is_none()
            && let Some(link) = self.google_maps_link
        {
            temple.google_maps_link = link;
        }
        temple
    }
}

/// Returns the record array for `kind`.
///
/// # Errors
///
/// Returns [`SourceError::Malformed`] if the payload has no record array
/// where `kind` expects one.
pub fn records(kind: SourceKind, payload: &Value) -> Result<&[Value], SourceError> {
    let found = match kind {
        SourceKind::FlatJson => flat_json::records(payload),
        SourceKind::NestedResource => nested_resource::records(payload),
        SourceKind::GeoJson => geojson::records(payload),
        SourceKind::Overpass => overpass::records(payload),
    };

    found.map(Vec::as_slice).ok_or_else(|| SourceError::Malformed {
        message: format!("{kind} payload has no record array"),
    })
}

/// Reads one raw record into a [`Draft`].
#[must_use]
pub fn draft(kind: SourceKind, record: &Value) -> Draft {
    match kind {
        SourceKind::FlatJson => flat_json::draft(record),
        SourceKind::NestedResource => nested_resource::draft(record),
        SourceKind::GeoJson => geojson::draft(record),
        SourceKind::Overpass => overpass::draft(record),
    }
}

/// Normalizes one raw record. Never fails: absent fields are defaulted.
#[must_use]
pub fn normalize_record(kind: SourceKind, source_id: &str, index: usize, record: &Value) -> Temple {
    draft(kind, record).into_temple(synthesized_id(source_id, index))
}

/// Normalizes every record in `payload`, preserving order.
///
/// Identifiers are made unique within the batch: a record whose id was
/// already seen gets `-<index>` appended, repeatedly if the result is
/// also taken.
///
/// # Errors
///
/// Returns [`SourceError::Malformed`] if the payload has no record array.
pub fn normalize_payload(
    kind: SourceKind,
    source_id: &str,
    payload: &Value,
) -> Result<Vec<Temple>, SourceError> {
    let records = records(kind, payload)?;
    let mut seen = BTreeSet::new();

    let temples = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut temple = normalize_record(kind, source_id, index, record);
            if !seen.insert(temple.id.clone()) {
                let mut unique = format!("{}-{index}", temple.id);
                while !seen.insert(unique.clone()) {
                    unique = format!("{unique}-{index}");
                }
                log::debug!("[{source_id}] Duplicate id {} renamed to {unique}", temple.id);
                temple.id = unique;
            }
            temple
        })
        .collect::<Vec<_>>();

    log::debug!("[{source_id}] Normalized {} {kind} records", temples.len());
    Ok(temples)
}

/// Builds the id used when a record carries none.
#[must_use]
pub fn synthesized_id(source_id: &str, index: usize) -> String {
    format!("{source_id}-{index}")
}
