use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}: {message}")]
    HttpStatus {
        url: String,
        status: StatusCode,
        message: String,
    },

    #[error("Failed to read response body from {0}")]
    BodyRead(String, #[source] reqwest::Error),

    #[error("Malformed payload received from {url}")]
    MalformedPayload {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// The upstream HTTP status, when the archive answered with one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SourceError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
