//! File-backed visit counter.
//!
//! The count lives in a JSON file of the form `{"visits": <n>}`. The file
//! is created with a count of zero on first read. Reads and increments
//! within one process are serialized by a mutex; separate processes
//! sharing the file may still lose increments.

use std::path::{Path, PathBuf};

use temple_map_server_models::ApiVisits;
use tokio::sync::Mutex;

/// Errors from the visit counter.
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    /// The counter file could not be read or written.
    #[error("Visit counter I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The counter file is not valid JSON.
    #[error("Visit counter is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistent visit counter.
pub struct VisitCounter {
    path: PathBuf,
    lock: Mutex<()>,
}

impl VisitCounter {
    /// Creates a counter stored at `path`. Nothing is touched until the
    /// first read.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the counter file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current count, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError`] if the file cannot be read, created, or
    /// parsed.
    pub async fn get(&self) -> Result<u64, VisitError> {
        let _guard = self.lock.lock().await;
        self.read_or_init().await
    }

    /// Adds one visit and returns the new count.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError`] if the file cannot be read, parsed, or
    /// written.
    pub async fn increment(&self) -> Result<u64, VisitError> {
        let _guard = self.lock.lock().await;
        let visits = self.read_or_init().await? + 1;
        self.write(visits).await?;
        Ok(visits)
    }

    async fn read_or_init(&self) -> Result<u64, VisitError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(body) => Ok(serde_json::from_str::<ApiVisits>(&body)?.visits),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Creating visit counter at {}", self.path.display());
                self.write(0).await?;
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, visits: u64) -> Result<(), VisitError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string(&ApiVisits { visits })?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("temple-map-visits-{}", uuid::Uuid::new_v4()))
            .join("visits.json")
    }

    #[tokio::test]
    async fn first_read_creates_zero() {
        let counter = VisitCounter::new(temp_path());

        assert_eq!(counter.get().await.unwrap(), 0);
        let body = std::fs::read_to_string(counter.path()).unwrap();
        assert_eq!(body, r#"{"visits":0}"#);
    }

    #[tokio::test]
    async fn increments_persist() {
        let path = temp_path();
        let counter = VisitCounter::new(&path);

        assert_eq!(counter.increment().await.unwrap(), 1);
        assert_eq!(counter.increment().await.unwrap(), 2);

        let reopened = VisitCounter::new(&path);
        assert_eq!(reopened.get().await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_increments_are_not_lost() {
        let counter = Arc::new(VisitCounter::new(temp_path()));
        let mut tasks = tokio::task::JoinSet::new();

        for _ in 0..20 {
            let counter = Arc::clone(&counter);
            tasks.spawn(async move { counter.increment().await.unwrap() });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap();
        }

        assert_eq!(counter.get().await.unwrap(), 20);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let counter = VisitCounter::new(&path);
        assert!(matches!(counter.get().await, Err(VisitError::Json(_))));
    }
}
