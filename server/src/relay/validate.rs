//! Request Validation
//!
//! Decoding and required-field checks. Nothing here touches the network.

use liner_common::{PostRequest, ReactionRequest};

use super::error::{RelayError, ValidationError};

/// Decode a post request from raw JSON.
pub fn decode_post(raw: &[u8]) -> Result<PostRequest, RelayError> {
    serde_json::from_slice(raw).map_err(RelayError::Decode)
}

/// Decode a reaction request from raw JSON.
pub fn decode_reaction(raw: &[u8]) -> Result<ReactionRequest, RelayError> {
    serde_json::from_slice(raw).map_err(RelayError::Decode)
}

/// Check a post request. Channel is checked first, then content, then ttl.
pub fn validate_post(req: &PostRequest) -> Result<(), ValidationError> {
    if req.channel.is_empty() {
        return Err(ValidationError::MissingChannel);
    }
    if req.text.is_empty() && !req.has_blocks() {
        return Err(ValidationError::MissingContent);
    }
    if req.ttl < 0 {
        return Err(ValidationError::InvalidTtl);
    }
    Ok(())
}

/// Check a reaction request.
pub fn validate_reaction(req: &ReactionRequest) -> Result<(), ValidationError> {
    if req.reaction.is_empty() || req.channel.is_empty() || req.ts.is_empty() {
        return Err(ValidationError::MissingReactionFields);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(value: serde_json::Value) -> PostRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_text_message() {
        assert_eq!(
            validate_post(&post(json!({"channel": "#general", "text": "hi"}))),
            Ok(())
        );
    }

    #[test]
    fn test_blocks_without_text_is_valid() {
        let req = post(json!({"channel": "C1", "blocks": [{"type": "divider"}]}));
        assert_eq!(validate_post(&req), Ok(()));
    }

    #[test]
    fn test_missing_channel_wins_over_other_failures() {
        // Every other field is also wrong; the answer must not change.
        for value in [
            json!({"text": "hi"}),
            json!({"channel": "", "text": "hi"}),
            json!({}),
            json!({"ttl": -5}),
            json!({"channel": "", "blocks": [], "ttl": -1}),
        ] {
            assert_eq!(
                validate_post(&post(value.clone())),
                Err(ValidationError::MissingChannel),
                "{value}"
            );
        }
    }

    #[test]
    fn test_missing_content() {
        for value in [
            json!({"channel": "#general"}),
            json!({"channel": "#general", "text": ""}),
            json!({"channel": "#general", "blocks": []}),
            json!({"channel": "#general", "blocks": null}),
            json!({"channel": "#general", "ttl": -1}),
        ] {
            assert_eq!(
                validate_post(&post(value.clone())),
                Err(ValidationError::MissingContent),
                "{value}"
            );
        }
    }

    #[test]
    fn test_negative_ttl() {
        let req = post(json!({"channel": "C1", "text": "hi", "ttl": -1}));
        assert_eq!(validate_post(&req), Err(ValidationError::InvalidTtl));

        let req = post(json!({"channel": "C1", "text": "hi", "ttl": 0}));
        assert_eq!(validate_post(&req), Ok(()));
    }

    #[test]
    fn test_reaction_fields_required() {
        let full = ReactionRequest {
            reaction: "thumbsup".into(),
            channel: "C1".into(),
            ts: "1.1".into(),
            remove: false,
        };
        assert_eq!(validate_reaction(&full), Ok(()));

        for req in [
            ReactionRequest { reaction: String::new(), ..full.clone() },
            ReactionRequest { channel: String::new(), ..full.clone() },
            ReactionRequest { ts: String::new(), ..full.clone() },
        ] {
            assert_eq!(
                validate_reaction(&req),
                Err(ValidationError::MissingReactionFields)
            );
        }
    }

    #[test]
    fn test_decode_errors_are_distinct() {
        let err = decode_post(br##"{"channel":"#general""##).unwrap_err();
        assert!(matches!(err, RelayError::Decode(_)));

        let err = decode_reaction(b"not json").unwrap_err();
        assert!(matches!(err, RelayError::Decode(_)));

        // Wrong type for ttl is a decode error, not a validation error.
        let err = decode_post(br#"{"channel":"C1","text":"hi","ttl":"soon"}"#).unwrap_err();
        assert!(matches!(err, RelayError::Decode(_)));
    }
}
