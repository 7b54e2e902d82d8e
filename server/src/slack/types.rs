//! Slack Request and Response Types

use liner_common::MessageMetadata;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single Block Kit block.
///
/// Only `type` is read; every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Message content for `chat.postMessage`, minus the channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutboundMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    /// Always `false`; relayed messages never expand link previews.
    pub unfurl_links: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

#[derive(Debug, Serialize)]
pub(super) struct PostMessageBody<'a> {
    pub channel: &'a str,
    #[serde(flatten)]
    pub message: &'a OutboundMessage,
}

#[derive(Debug, Serialize)]
pub(super) struct ReactionBody<'a> {
    pub name: &'a str,
    pub channel: &'a str,
    pub timestamp: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct PostMessageResponse {
    pub channel: String,
    pub ts: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthTestResponse {
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_keeps_unknown_fields() {
        let raw = json!({
            "type": "section",
            "text": {"type": "mrkdwn", "text": "*bold*"},
            "block_id": "b1"
        });
        let block: Block = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(block.kind, "section");
        assert_eq!(serde_json::to_value(&block).unwrap(), raw);
    }

    #[test]
    fn test_block_requires_type() {
        assert!(serde_json::from_value::<Block>(json!({"text": "no type"})).is_err());
    }

    #[test]
    fn test_post_body_shape() {
        let message = OutboundMessage {
            text: Some("hi".into()),
            thread_ts: Some("1.1".into()),
            ..OutboundMessage::default()
        };
        let body = PostMessageBody {
            channel: "#general",
            message: &message,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "channel": "#general",
                "text": "hi",
                "thread_ts": "1.1",
                "unfurl_links": false
            })
        );
    }
}
