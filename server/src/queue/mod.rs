//! Redis Queue Layer
//!
//! Redis connection, the blocking list pop the consumers read from, and the
//! pub/sub publish used for deletion notices.

pub mod consumer;
mod publish;

use std::time::Duration;

use async_trait::async_trait;
use fred::interfaces::ListInterface;
use fred::prelude::*;
use tracing::info;

pub use consumer::{ConsumerSettings, QueueHandler};
pub use publish::{NoticePublisher, RedisNoticePublisher};

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Redis error: {0}")]
    Redis(#[from] fred::error::Error),

    #[error("Failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Create Redis client.
///
/// `password` overrides any password embedded in the URL.
pub async fn create_redis_client(
    redis_url: &str,
    password: Option<&str>,
) -> Result<Client, QueueError> {
    let mut config = Config::from_url(redis_url)?;
    if let Some(password) = password.filter(|p| !p.is_empty()) {
        config.password = Some(password.to_string());
    }

    let client = Client::new(config, None, None, None);
    client.connect();
    client.wait_for_connect().await?;

    info!("Connected to Redis");
    Ok(client)
}

/// A FIFO list with a blocking pop.
#[async_trait]
pub trait QueueSource: Send + Sync {
    /// Pop the oldest item from `key`, waiting up to `timeout`.
    ///
    /// `Ok(None)` means the wait elapsed with nothing to read.
    async fn pop(&self, key: &str, timeout: Duration) -> Result<Option<String>, QueueError>;
}

/// Shortest wait passed to `BLPOP`; a zero timeout would block forever.
const MIN_POP_TIMEOUT: Duration = Duration::from_millis(10);

/// [`QueueSource`] over Redis lists (`RPUSH` by producers, `BLPOP` here).
///
/// A client blocked in `BLPOP` holds every other command sent on it, so each
/// consumer loop needs its own connection (see [`RedisQueue::connect`]).
#[derive(Clone)]
pub struct RedisQueue {
    redis: Client,
}

impl RedisQueue {
    #[must_use]
    pub const fn new(redis: Client) -> Self {
        Self { redis }
    }

    /// Open a dedicated connection with the same settings as `base`.
    pub async fn connect(base: &Client) -> Result<Self, QueueError> {
        let redis = base.clone_new();
        redis.connect();
        redis.wait_for_connect().await?;
        Ok(Self::new(redis))
    }

    /// Close the underlying connection.
    pub async fn close(&self) -> Result<(), QueueError> {
        self.redis.quit().await?;
        Ok(())
    }
}

#[async_trait]
impl QueueSource for RedisQueue {
    async fn pop(&self, key: &str, timeout: Duration) -> Result<Option<String>, QueueError> {
        let timeout = timeout.max(MIN_POP_TIMEOUT);
        let popped: Option<(String, String)> =
            self.redis.blpop(key, timeout.as_secs_f64()).await?;
        Ok(popped.map(|(_key, value)| value))
    }
}
