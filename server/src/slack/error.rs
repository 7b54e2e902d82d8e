//! Slack Error Types

#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    #[error("{method} request failed: {source}")]
    Transport {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} returned HTTP {status}")]
    Status { method: &'static str, status: u16 },

    #[error("{method} failed: {error}")]
    Api { method: &'static str, error: String },

    #[error("{method} returned an unexpected response: {reason}")]
    BadResponse { method: &'static str, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
