//! Source registry: loads all temple source definitions from embedded TOML
//! configs.
//!
//! Each `.toml` file in `packages/source/sources/` is baked into the binary
//! at compile time via [`include_str!`]. Adding a new source is as simple as
//! creating a new TOML file and adding it to the list below.

use temple_map_source_models::SourceDefinition;

/// Source used when none is configured.
pub const DEFAULT_SOURCE_ID: &str = "hindu_temples_geojson";

/// TOML configs embedded at compile time.
const SOURCE_TOMLS: &[(&str, &str)] = &[
    (
        "hindu_temples_geojson",
        include_str!("../sources/hindu_temples_geojson.toml"),
    ),
    ("temples_json", include_str!("../sources/temples_json.toml")),
    (
        "temple_directory_export",
        include_str!("../sources/temple_directory_export.toml"),
    ),
    (
        "overpass_hindu_temples",
        include_str!("../sources/overpass_hindu_temples.toml"),
    ),
];

/// Parses a source definition from TOML.
///
/// # Errors
///
/// Returns a [`toml::de::Error`] if the TOML is malformed.
pub fn parse_source_toml(toml_str: &str) -> Result<SourceDefinition, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns every configured source definition.
///
/// # Panics
///
/// Panics if any embedded TOML config is malformed. The configs are
/// compiled in, so this is caught by the registry tests.
#[must_use]
pub fn all_sources() -> Vec<SourceDefinition> {
    SOURCE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            parse_source_toml(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse source config '{name}': {e}"))
        })
        .collect()
}

/// Returns the definition with the given id.
#[must_use]
pub fn find_source(id: &str) -> Option<SourceDefinition> {
    all_sources().into_iter().find(|s| s.id == id)
}
