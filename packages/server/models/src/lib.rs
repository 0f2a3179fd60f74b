#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the temple map server.
//!
//! Field names are camelCase on the wire to match what the map frontend
//! already sends and reads.

use serde::{Deserialize, Serialize};
use temple_map_temple_models::Temple;

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Error body returned with a non-success status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Short, user-facing summary.
    pub error: String,
    /// Underlying cause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// `GET /api/temples` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplesResponse {
    /// The normalized directory, in source order.
    pub temples: Vec<Temple>,
}

/// Query parameters for `GET /api/temples/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TempleSearchParams {
    /// Free-text query matched against name and address.
    pub q: Option<String>,
    /// Exact state name, or `all`.
    pub state: Option<String>,
}

/// `GET /api/temples/search` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempleSearchResponse {
    /// Matching temples, in source order.
    pub temples: Vec<Temple>,
    /// Matches that can be shown on the map.
    pub located: usize,
    /// Size of the whole directory.
    pub total: usize,
}

/// `GET /api/states` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatesResponse {
    /// Sorted, distinct state names.
    pub states: Vec<String>,
}

/// `GET`/`POST /api/visits` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiVisits {
    /// Total recorded visits.
    pub visits: u64,
}

/// A "submit a missing temple" form.
///
/// Coordinates arrive as free text because the form field is optional and
/// unvalidated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    /// Temple name (required).
    #[serde(default)]
    pub temple_name: String,
    /// Full address (required).
    #[serde(default)]
    pub address: String,
    /// State (required).
    #[serde(default)]
    pub state: String,
    /// Latitude, if the submitter knows it.
    #[serde(default)]
    pub latitude: Option<String>,
    /// Longitude, if the submitter knows it.
    #[serde(default)]
    pub longitude: Option<String>,
    /// Submitter's name.
    #[serde(default)]
    pub submitter_name: Option<String>,
    /// Submitter's email.
    #[serde(default)]
    pub submitter_email: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub additional_info: Option<String>,
}

/// `POST /api/send-feedback` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    /// Whether the submission was accepted.
    pub success: bool,
    /// User-facing status message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_reads_camel_case_and_tolerates_missing_optionals() {
        let submission: FeedbackSubmission = serde_json::from_value(serde_json::json!({
            "templeName": "Sri Venkateswara Temple",
            "address": "1230 S McCully Dr, Penn Hills, PA 15235",
            "state": "Pennsylvania",
            "submitterEmail": "someone@example.com"
        }))
        .unwrap();

        assert_eq!(submission.temple_name, "Sri Venkateswara Temple");
        assert_eq!(submission.state, "Pennsylvania");
        assert!(submission.latitude.is_none());
        assert_eq!(
            submission.submitter_email.as_deref(),
            Some("someone@example.com")
        );
    }

    #[test]
    fn api_error_omits_missing_details() {
        let body = serde_json::to_value(ApiError {
            error: "Failed to fetch temple data".to_string(),
            details: None,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "Failed to fetch temple data" })
        );
    }
}
