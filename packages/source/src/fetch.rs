//! Raw payload readers for file and HTTP sources.

use std::path::Path;

use crate::SourceError;

/// Reads and parses a JSON (or `GeoJSON`) file.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or is not JSON.
pub async fn read_json_file(path: &Path) -> Result<serde_json::Value, SourceError> {
    log::debug!("Reading temple data from {}", path.display());
    let body = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Fetches a JSON payload with a single GET request.
///
/// When `query` is set it is sent as the `data` parameter, which is how
/// Overpass QL is submitted.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails, the status is not
/// successful, or the body is not JSON.
pub async fn fetch_json_url(
    client: &reqwest::Client,
    url: &str,
    query: Option<&str>,
) -> Result<serde_json::Value, SourceError> {
    let mut request = client.get(url).header(reqwest::header::ACCEPT, "application/json");
    if let Some(query) = query {
        request = request.query(&[("data", query)]);
    }

    log::info!("Fetching temple data from {url}");
    let resp = request.send().await?;
    if !resp.status().is_success() {
        return Err(SourceError::Status {
            status: resp.status(),
            url: url.to_string(),
        });
    }

    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}
