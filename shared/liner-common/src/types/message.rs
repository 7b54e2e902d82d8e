//! Message Types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A request to post a message, as read from the message queue or the
/// `POST /message` body.
///
/// `blocks` and `metadata` are kept as undecoded JSON here; the relay parses
/// them only when it builds the outbound call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostRequest {
    /// Channel ID (`C1234567890`) or name (`#general`).
    #[serde(default)]
    pub channel: String,
    /// Message text. Required unless `blocks` is present.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Block Kit layout, forwarded as-is.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocks: Option<Value>,
    /// Timestamp of the parent message when replying in a thread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    /// Message metadata (`event_type` + `event_payload`).
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<Value>,
    /// Seconds until the message should be deleted. `0` keeps it forever.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub ttl: i64,
}

impl PostRequest {
    /// Create a plain text message request.
    #[must_use]
    pub fn text(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Whether the request carries any block content.
    ///
    /// `null`, an empty array and an empty object all count as no blocks.
    #[must_use]
    pub fn has_blocks(&self) -> bool {
        match &self.blocks {
            None | Some(Value::Null) => false,
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(fields)) => !fields.is_empty(),
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Thread parent timestamp, with an empty string treated as absent.
    #[must_use]
    pub fn thread_ts(&self) -> Option<&str> {
        self.thread_ts.as_deref().filter(|ts| !ts.is_empty())
    }
}

/// A key that is present decodes to `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Metadata attached to a posted message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub event_payload: Map<String, Value>,
}

/// Where a message actually landed.
///
/// `channel` is the platform channel ID, which may differ from the name the
/// caller used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResult {
    pub channel: String,
    pub ts: String,
}
