//! Server settings read from the environment.

use std::path::PathBuf;

use temple_map_ingest::config::IngestConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for [`crate::run_server`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Source selection and data directory.
    pub ingest: IngestConfig,
    /// Form relay endpoint (`FEEDBACK_RELAY_URL`). Feedback is only logged
    /// when unset.
    pub feedback_relay_url: Option<String>,
    /// Access key sent to the relay (`FEEDBACK_ACCESS_KEY`).
    pub feedback_access_key: Option<String>,
    /// Built frontend to serve at `/` (`TEMPLE_MAP_STATIC_DIR`).
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            ingest: IngestConfig::default(),
            feedback_relay_url: None,
            feedback_access_key: None,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads settings from the environment, using defaults for anything
    /// unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port: var("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            ingest: IngestConfig::from_env(),
            feedback_relay_url: var("FEEDBACK_RELAY_URL"),
            feedback_access_key: var("FEEDBACK_ACCESS_KEY"),
            static_dir: var("TEMPLE_MAP_STATIC_DIR").map(PathBuf::from),
        }
    }

    /// Where the visit counter is stored.
    #[must_use]
    pub fn visits_path(&self) -> PathBuf {
        self.ingest.data_dir.join("visits.json")
    }
}
