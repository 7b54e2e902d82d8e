//! Relay Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::queue::QueueError;
use crate::slack::SlackError;

/// A request failed a required-field or range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("channel is required")]
    MissingChannel,

    #[error("text or blocks is required")]
    MissingContent,

    #[error("ttl must be non-negative")]
    InvalidTtl,

    #[error("reaction, channel, and ts are required")]
    MissingReactionFields,
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Invalid JSON payload: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid blocks payload: {0}")]
    BlocksDecode(#[source] serde_json::Error),

    #[error("Invalid metadata payload: {0}")]
    MetadataDecode(#[source] serde_json::Error),

    #[error("Invalid message: {0}")]
    Validation(#[from] ValidationError),

    #[error("Slack call failed: {0}")]
    RemoteCallFailed(#[from] SlackError),

    #[error("Failed to publish deletion notice: {0}")]
    PublishFailed(#[source] QueueError),
}

impl RelayError {
    /// Whether the caller sent something we could never deliver.
    ///
    /// Client errors are safe to echo back; everything else is reported
    /// generically.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Decode(_) | Self::BlocksDecode(_) | Self::MetadataDecode(_) | Self::Validation(_)
        )
    }

    /// Short machine-friendly name, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode_error",
            Self::BlocksDecode(_) => "blocks_decode_error",
            Self::MetadataDecode(_) => "metadata_decode_error",
            Self::Validation(ValidationError::MissingChannel) => "missing_channel",
            Self::Validation(ValidationError::MissingContent) => "missing_content",
            Self::Validation(ValidationError::InvalidTtl) => "invalid_ttl",
            Self::Validation(ValidationError::MissingReactionFields) => "missing_reaction_fields",
            Self::RemoteCallFailed(_) => "remote_call_failed",
            Self::PublishFailed(_) => "publish_failed",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            return (StatusCode::BAD_REQUEST, self.to_string()).into_response();
        }

        tracing::error!(error = %self, kind = self.kind(), "Error sending message to Slack");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send message to Slack",
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(RelayError::Decode(decode).is_client_error());
        assert!(RelayError::from(ValidationError::InvalidTtl).is_client_error());

        let remote = RelayError::from(SlackError::Api {
            method: "chat.postMessage",
            error: "channel_not_found".into(),
        });
        assert!(!remote.is_client_error());
        assert_eq!(remote.kind(), "remote_call_failed");
    }

    #[test]
    fn test_response_status() {
        let resp = RelayError::from(ValidationError::MissingChannel).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = RelayError::from(SlackError::Api {
            method: "chat.postMessage",
            error: "invalid_auth".into(),
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
