//! Error types for the API client.

use std::time::Duration;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be built or sent (bad URL, connection failure).
    #[error("Request failed: {0}")]
    RequestFailed(String),
    /// The portal answered with a non-success status.
    #[error("Remote query failed with HTTP {status}: {}", remote_message(.body))]
    RemoteQuery { status: u16, body: String },
    /// No response within the configured bound. Not retried.
    #[error("Request timed out after {}s", .after.as_secs_f64())]
    Timeout { after: Duration },
    /// Credentials are required and none were supplied.
    #[error("No API credentials configured")]
    MissingCredentials,
    /// The body was not the expected JSON shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl Error {
    /// Human-facing message carried by a remote error body, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Error::RemoteQuery { body, .. } => Some(remote_message(body)),
            _ => None,
        }
    }
}

/// Socrata errors are JSON objects with a `message` field; anything else is
/// shown verbatim.
fn remote_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
