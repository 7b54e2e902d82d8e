//! Request Dispatch
//!
//! Turns one validated request into exactly one Slack call, plus at most one
//! deletion notice for posts that carry a TTL.

use std::sync::Arc;

use liner_common::{DeletionNotice, MessageMetadata, PostRequest, PostResult, ReactionRequest};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::error::RelayError;
use super::validate::{validate_post, validate_reaction};
use crate::queue::NoticePublisher;
use crate::slack::{Block, ChatApi, OutboundMessage};

/// Shared by the HTTP endpoint and both queue consumers.
pub struct Dispatcher {
    chat: Arc<dyn ChatApi>,
    notices: Arc<dyn NoticePublisher>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(chat: Arc<dyn ChatApi>, notices: Arc<dyn NoticePublisher>) -> Self {
        Self { chat, notices }
    }

    /// Post a message and, when `ttl > 0`, schedule its deletion.
    ///
    /// The deletion notice is keyed on the channel and timestamp Slack
    /// assigned, not on what the caller sent. A failed notice is logged and
    /// does not fail the post.
    pub async fn post(&self, req: &PostRequest) -> Result<PostResult, RelayError> {
        validate_post(req)?;
        let message = build_message(req)?;

        info!(channel = %req.channel, text = %req.text, "Sending message");
        if let Some(metadata) = &message.metadata {
            info!(event_type = %metadata.event_type, "Including metadata");
        }

        let result = self.chat.post_message(&req.channel, &message).await?;
        info!(
            channel = %result.channel,
            ts = %result.ts,
            "Message sent successfully"
        );

        if req.ttl > 0 {
            let notice = DeletionNotice {
                channel: result.channel.clone(),
                ts: result.ts.clone(),
                ttl: req.ttl,
            };
            if let Err(e) = self.schedule_deletion(&notice).await {
                warn!(
                    channel = %notice.channel,
                    ts = %notice.ts,
                    ttl = notice.ttl,
                    error = %e,
                    "Deletion notice dropped"
                );
            }
        }

        Ok(result)
    }

    /// Add or remove a reaction.
    pub async fn react(&self, req: &ReactionRequest) -> Result<(), RelayError> {
        validate_reaction(req)?;
        let item = req.item_ref();

        if req.remove {
            info!(reaction = %req.reaction, channel = %item.channel, ts = %item.timestamp, "Removing reaction");
            self.chat.remove_reaction(&req.reaction, &item).await?;
            info!(reaction = %req.reaction, channel = %item.channel, ts = %item.timestamp, "Reaction removed");
        } else {
            info!(reaction = %req.reaction, channel = %item.channel, ts = %item.timestamp, "Adding reaction");
            self.chat.add_reaction(&req.reaction, &item).await?;
            info!(reaction = %req.reaction, channel = %item.channel, ts = %item.timestamp, "Reaction added");
        }

        Ok(())
    }

    async fn schedule_deletion(&self, notice: &DeletionNotice) -> Result<(), RelayError> {
        self.notices
            .publish(notice)
            .await
            .map_err(RelayError::PublishFailed)?;
        info!(
            channel = %notice.channel,
            ts = %notice.ts,
            ttl = notice.ttl,
            "Published deletion notice"
        );
        Ok(())
    }
}

/// Assemble the `chat.postMessage` content for a request.
///
/// `blocks` and `metadata` are parsed here rather than at decode time, so a
/// malformed value surfaces as its own decode error.
fn build_message(req: &PostRequest) -> Result<OutboundMessage, RelayError> {
    let text = (!req.text.is_empty()).then(|| req.text.clone());

    let blocks = match &req.blocks {
        Some(value) if req.has_blocks() => Some(parse_blocks(value)?),
        _ => None,
    };

    let metadata = req
        .metadata
        .as_ref()
        .filter(|value| !value.is_null())
        .map(|value| MessageMetadata::deserialize(value).map_err(RelayError::MetadataDecode))
        .transpose()?;

    Ok(OutboundMessage {
        text,
        blocks,
        thread_ts: req.thread_ts().map(str::to_string),
        unfurl_links: false,
        metadata,
    })
}

/// Blocks arrive either as a JSON array or as a string holding one.
fn parse_blocks(value: &Value) -> Result<Vec<Block>, RelayError> {
    match value {
        Value::String(encoded) => {
            serde_json::from_str(encoded).map_err(RelayError::BlocksDecode)
        }
        other => Vec::<Block>::deserialize(other).map_err(RelayError::BlocksDecode),
    }
}
