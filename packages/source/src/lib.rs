#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Temple source trait and normalization logic.
//!
//! Every source implements [`TempleSource`]: it fetches one raw payload and
//! normalizes it into canonical [`Temple`] records. The four supported
//! payload shapes share a single implementation, [`ConfiguredSource`],
//! selected by the [`SourceKind`] in its TOML definition.

pub mod fetch;
pub mod normalize;
pub mod parsing;
pub mod progress;
pub mod registry;

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use temple_map_source_models::{SourceDefinition, SourceKind, SourceLocation};
use temple_map_temple_models::Temple;

/// Errors that can occur while loading a temple source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Response status.
        status: reqwest::StatusCode,
        /// Requested URL.
        url: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload did not have the structure its source kind requires.
    #[error("Malformed payload: {message}")]
    Malformed {
        /// Description of what was missing.
        message: String,
    },

    /// The payload parsed but held no records.
    #[error("Source {source_id} returned no temples")]
    Empty {
        /// Source that came back empty.
        source_id: String,
    },

    /// No source definition with this id exists.
    #[error("Unknown temple source: {id}")]
    UnknownSource {
        /// The requested id.
        id: String,
    },
}

/// Trait that all temple sources implement.
#[async_trait]
pub trait TempleSource: Send + Sync {
    /// Returns a unique identifier for this source.
    fn id(&self) -> &str;

    /// Returns the human-readable name of this source.
    fn name(&self) -> &str;

    /// Reads the raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the file or endpoint cannot be read or
    /// the body is not JSON.
    async fn fetch(&self) -> Result<serde_json::Value, SourceError>;

    /// Normalizes a raw payload into canonical temples, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the payload lacks its record array.
    fn normalize(&self, payload: &serde_json::Value) -> Result<Vec<Temple>, SourceError>;

    /// Fetches and normalizes in one step, rejecting an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on any fetch or structure failure, or
    /// [`SourceError::Empty`] when no records were found.
    async fn load(&self) -> Result<Vec<Temple>, SourceError> {
        let payload = self.fetch().await?;
        let temples = self.normalize(&payload)?;
        if temples.is_empty() {
            return Err(SourceError::Empty {
                source_id: self.id().to_string(),
            });
        }
        log::info!("[{}] Loaded {} temples", self.id(), temples.len());
        Ok(temples)
    }
}

/// A source backed by a [`SourceDefinition`].
pub struct ConfiguredSource {
    definition: SourceDefinition,
    client: reqwest::Client,
    data_dir: PathBuf,
}

impl ConfiguredSource {
    /// Creates a source. Relative file paths resolve against `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(definition: SourceDefinition, data_dir: &Path) -> Result<Self, SourceError> {
        let timeout = match &definition.location {
            SourceLocation::Url { timeout_secs, .. } => Duration::from_secs(*timeout_secs),
            SourceLocation::File { .. } => Duration::from_secs(60),
        };
        let client = reqwest::Client::builder()
            .user_agent(concat!("temple-map/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            definition,
            client,
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Looks up `id` in the registry and creates a source for it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnknownSource`] if no such definition exists.
    pub fn from_registry(id: &str, data_dir: &Path) -> Result<Self, SourceError> {
        let definition = registry::find_source(id).ok_or_else(|| SourceError::UnknownSource {
            id: id.to_string(),
        })?;
        Self::new(definition, data_dir)
    }

    /// The underlying definition.
    #[must_use]
    pub const fn definition(&self) -> &SourceDefinition {
        &self.definition
    }
}

#[async_trait]
impl TempleSource for ConfiguredSource {
    fn id(&self) -> &str {
        &self.definition.id
    }

    fn name(&self) -> &str {
        &self.definition.name
    }

    async fn fetch(&self) -> Result<serde_json::Value, SourceError> {
        match &self.definition.location {
            SourceLocation::File { path } => {
                let path = self.data_dir.join(path);
                fetch::read_json_file(&path).await
            }
            SourceLocation::Url { url, query, .. } => {
                fetch::fetch_json_url(&self.client, url, query.as_deref()).await
            }
        }
    }

    fn normalize(&self, payload: &serde_json::Value) -> Result<Vec<Temple>, SourceError> {
        normalize::normalize_payload(self.definition.kind, &self.definition.id, payload)
    }
}

/// A source whose payload is already in memory.
///
/// Used for uploaded data and tests.
pub struct StaticSource {
    id: String,
    kind: SourceKind,
    payload: serde_json::Value,
}

impl StaticSource {
    /// Creates a source that always returns `payload`.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: SourceKind, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            kind,
            payload,
        }
    }
}

#[async_trait]
impl TempleSource for StaticSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }

    async fn fetch(&self) -> Result<serde_json::Value, SourceError> {
        Ok(self.payload.clone())
    }

    fn normalize(&self, payload: &serde_json::Value) -> Result<Vec<Temple>, SourceError> {
        normalize::normalize_payload(self.kind, &self.id, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_rejects_empty_payload() {
        let source = StaticSource::new("empty", SourceKind::FlatJson, serde_json::json!([]));
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, SourceError::Empty { .. }));
    }

    #[tokio::test]
    async fn load_reads_file_relative_to_data_dir() {
        let dir =
            std::env::temp_dir().join(format!("temple-map-source-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("temples.json"),
            r#"[{"id":"a","name":"Hindu Temple of Minnesota","state":"Minnesota"}]"#,
        )
        .unwrap();

        let source = ConfiguredSource::new(
            SourceDefinition {
                id: "local".to_string(),
                name: "Local".to_string(),
                kind: SourceKind::FlatJson,
                location: SourceLocation::File {
                    path: "temples.json".to_string(),
                },
            },
            &dir,
        )
        .unwrap();

        let temples = source.load().await.unwrap();
        assert_eq!(temples.len(), 1);
        assert_eq!(temples[0].state, "Minnesota");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = ConfiguredSource::new(
            SourceDefinition {
                id: "missing".to_string(),
                name: "Missing".to_string(),
                kind: SourceKind::GeoJson,
                location: SourceLocation::File {
                    path: "does-not-exist.geojson".to_string(),
                },
            },
            Path::new("/nonexistent-temple-map-dir"),
        )
        .unwrap();

        assert!(matches!(source.load().await, Err(SourceError::Io(_))));
    }

    #[test]
    fn unknown_registry_id_is_rejected() {
        let err = ConfiguredSource::from_registry("nope", Path::new("data")).err();
        assert!(matches!(err, Some(SourceError::UnknownSource { .. })));
    }
}
