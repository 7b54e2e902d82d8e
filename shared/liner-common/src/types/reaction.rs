//! Reaction Types

use serde::{Deserialize, Serialize};

/// A request to add or remove an emoji reaction, as read from the reaction
/// queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRequest {
    /// Emoji name without colons (e.g. `heart_eyes_cat`).
    #[serde(default)]
    pub reaction: String,
    /// Channel ID of the target message.
    #[serde(default)]
    pub channel: String,
    /// Timestamp of the target message.
    #[serde(default)]
    pub ts: String,
    /// Remove the reaction instead of adding it.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub remove: bool,
}

impl ReactionRequest {
    /// The message this reaction targets.
    #[must_use]
    pub fn item_ref(&self) -> ItemRef {
        ItemRef {
            channel: self.channel.clone(),
            timestamp: self.ts.clone(),
        }
    }
}

/// A previously sent message, identified by channel and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub channel: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_defaults_to_false() {
        let req: ReactionRequest =
            serde_json::from_str(r#"{"reaction":"thumbsup","channel":"C1","ts":"1.1"}"#).unwrap();
        assert!(!req.remove);
        assert_eq!(
            req.item_ref(),
            ItemRef {
                channel: "C1".into(),
                timestamp: "1.1".into()
            }
        );
    }

    #[test]
    fn test_round_trip() {
        let req = ReactionRequest {
            reaction: "tada".into(),
            channel: "C9876543210".into(),
            ts: "1234567890.123456".into(),
            remove: true,
        };
        let encoded = serde_json::to_string(&req).unwrap();
        assert_eq!(serde_json::from_str::<ReactionRequest>(&encoded).unwrap(), req);
    }
}
