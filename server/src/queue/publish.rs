//! Deletion Notice Publishing

use async_trait::async_trait;
use fred::interfaces::PubsubInterface;
use fred::prelude::*;
use liner_common::DeletionNotice;

use super::QueueError;

/// Delivers deletion notices to the TimeBomb service.
#[async_trait]
pub trait NoticePublisher: Send + Sync {
    async fn publish(&self, notice: &DeletionNotice) -> Result<(), QueueError>;
}

/// Publishes notices as JSON on a Redis pub/sub channel.
#[derive(Clone)]
pub struct RedisNoticePublisher {
    redis: Client,
    channel: String,
}

impl RedisNoticePublisher {
    #[must_use]
    pub fn new(redis: Client, channel: impl Into<String>) -> Self {
        Self {
            redis,
            channel: channel.into(),
        }
    }
}

#[async_trait]
impl NoticePublisher for RedisNoticePublisher {
    async fn publish(&self, notice: &DeletionNotice) -> Result<(), QueueError> {
        let payload = serde_json::to_string(notice)?;
        self.redis
            .publish::<(), _, _>(self.channel.as_str(), payload)
            .await?;
        Ok(())
    }
}
