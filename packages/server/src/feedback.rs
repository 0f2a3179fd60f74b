//! "Submit a missing temple" handling.
//!
//! Every accepted submission is logged. When a relay endpoint is
//! configured the submission is also forwarded there as JSON together with
//! the relay access key, and the relay's verdict decides the outcome.

use serde::{Deserialize, Serialize};
use temple_map_server_models::FeedbackSubmission;
use uuid::Uuid;

const SUBJECT: &str = "New Temple Submission";

/// Errors from feedback submission.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    /// A required form field was blank.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Wire name of the field.
        field: &'static str,
    },

    /// The relay request failed.
    #[error("Feedback relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered with a non-success status.
    #[error("Feedback relay returned HTTP {status}")]
    Status {
        /// Response status.
        status: reqwest::StatusCode,
    },

    /// The relay accepted the request but reported failure.
    #[error("Feedback relay rejected the submission: {message}")]
    Rejected {
        /// The relay's explanation.
        message: String,
    },
}

/// Checks that the required fields are present.
///
/// # Errors
///
/// Returns [`FeedbackError::MissingField`] naming the first blank field.
pub fn validate(submission: &FeedbackSubmission) -> Result<(), FeedbackError> {
    let required = [
        ("templeName", &submission.temple_name),
        ("address", &submission.address),
        ("state", &submission.state),
    ];
    match required.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((field, _)) => Err(FeedbackError::MissingField { field: *field }),
        None => Ok(()),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RelayPayload<'a> {
    #[serde(rename = "access_key")]
    access_key: Option<&'a str>,
    subject: &'static str,
    submission_id: String,
    submitted_at: String,
    #[serde(flatten)]
    submission: &'a FeedbackSubmission,
}

#[derive(Deserialize)]
struct RelayVerdict {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

const fn default_success() -> bool {
    true
}

/// Logs submissions and optionally forwards them to a form relay.
pub struct FeedbackRelay {
    client: reqwest::Client,
    url: Option<String>,
    access_key: Option<String>,
}

impl FeedbackRelay {
    /// Creates a relay. With `url` unset, submissions are only logged.
    #[must_use]
    pub const fn new(
        client: reqwest::Client,
        url: Option<String>,
        access_key: Option<String>,
    ) -> Self {
        Self {
            client,
            url,
            access_key,
        }
    }

    /// Validates, logs, and (when configured) forwards a submission.
    /// Returns the id assigned to it.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::MissingField`] for an incomplete form, or
    /// a relay error if forwarding fails.
    pub async fn submit(&self, submission: &FeedbackSubmission) -> Result<Uuid, FeedbackError> {
        validate(submission)?;

        let id = Uuid::new_v4();
        let submitted_at = chrono::Utc::now().to_rfc3339();
        log::info!(
            "{SUBJECT} {id}: {} | {} | {} | coordinates {}, {} | from {} <{}> | {}",
            submission.temple_name,
            submission.address,
            submission.state,
            submission.latitude.as_deref().unwrap_or("-"),
            submission.longitude.as_deref().unwrap_or("-"),
            submission.submitter_name.as_deref().unwrap_or("anonymous"),
            submission.submitter_email.as_deref().unwrap_or("-"),
            submission.additional_info.as_deref().unwrap_or(""),
        );

        let Some(url) = &self.url else {
            return Ok(id);
        };

        let payload = RelayPayload {
            access_key: self.access_key.as_deref(),
            subject: SUBJECT,
            submission_id: id.to_string(),
            submitted_at,
            submission,
        };

        let resp = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&payload)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(FeedbackError::Status {
                status: resp.status(),
            });
        }

        let body = resp.text().await?;
        let verdict = serde_json::from_str::<RelayVerdict>(&body).unwrap_or(RelayVerdict {
            success: true,
            message: None,
        });
        if !verdict.success {
            return Err(FeedbackError::Rejected {
                message: verdict
                    .message
                    .unwrap_or_else(|| "no reason given".to_string()),
            });
        }

        log::debug!("Forwarded feedback {id} to relay");
        Ok(id)
    }
}
