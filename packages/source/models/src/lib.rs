#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Temple source configuration types.
//!
//! A [`SourceDefinition`] names where raw temple records come from and
//! which [`SourceKind`] they arrive in. Definitions are loaded from TOML
//! files embedded in `temple_map_source`.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The shape of the raw records a source produces.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SourceKind {
    /// A bare JSON array (or `{ "temples": [...] }`) of flat records.
    FlatJson,
    /// Records wrapped in `{ "resource": { ... } }` with nested
    /// `physicalAddress` and `contact` objects.
    NestedResource,
    /// A `GeoJSON` `FeatureCollection` with `[lon, lat]` point geometry.
    GeoJson,
    /// An Overpass API response with an `elements` array.
    Overpass,
}

/// Where a source's payload is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceLocation {
    /// A file on disk. Relative paths resolve against the data directory.
    File {
        /// Path to the file.
        path: String,
    },
    /// An HTTP GET endpoint.
    Url {
        /// Endpoint URL.
        url: String,
        /// Query sent as the `data` parameter (Overpass QL).
        #[serde(default)]
        query: Option<String>,
        /// Request timeout in seconds.
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

const fn default_timeout_secs() -> u64 {
    60
}

/// A configured temple source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Unique identifier (e.g., `"hindu_temples_geojson"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Raw record shape.
    pub kind: SourceKind,
    /// Where to read from.
    pub location: SourceLocation,
}
