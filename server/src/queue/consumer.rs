//! Queue Consumer Loop
//!
//! Pops serialized requests from one Redis list and hands them to a
//! [`QueueHandler`], one at a time, until cancelled.
//!
//! - Pop timeout: loop again.
//! - Pop error: sleep for the fixed backoff, then loop again.
//! - Item popped: decode and handle it. Failures are logged and never stop
//!   the loop.
//!
//! Cancellation is observed between items and during backoff; an item that
//! has been popped is always handled to completion.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::QueueSource;
use crate::config::Config;
use crate::relay::RelayError;

/// Longest payload excerpt written to logs.
const PAYLOAD_PREVIEW_CHARS: usize = 500;

/// Decodes and processes the items of one queue.
#[async_trait]
pub trait QueueHandler: Send + Sync {
    type Item: Send;

    /// Turn a raw queue item into a request.
    fn decode(&self, raw: &[u8]) -> Result<Self::Item, RelayError>;

    /// Process one decoded request.
    async fn handle(&self, item: Self::Item) -> Result<(), RelayError>;
}

/// Timing knobs for a consumer loop.
#[derive(Debug, Clone, Copy)]
pub struct ConsumerSettings {
    /// Bounded wait for each pop.
    pub pop_timeout: Duration,
    /// Delay after a failed pop.
    pub error_backoff: Duration,
}

impl Default for ConsumerSettings {
    fn default() -> Self {
        Self {
            pop_timeout: Duration::from_secs(5),
            error_backoff: Duration::from_secs(1),
        }
    }
}

impl From<&Config> for ConsumerSettings {
    fn from(config: &Config) -> Self {
        Self {
            pop_timeout: config.queue_pop_timeout,
            error_backoff: config.queue_error_backoff,
        }
    }
}

/// Run a consumer loop on `key` until `cancel` fires.
pub async fn run<H>(
    queue: Arc<dyn QueueSource>,
    key: String,
    handler: H,
    settings: ConsumerSettings,
    cancel: CancellationToken,
) where
    H: QueueHandler,
{
    info!(queue = %key, "Listening for items");

    while !cancel.is_cancelled() {
        let raw = match queue.pop(&key, settings.pop_timeout).await {
            Ok(Some(raw)) => raw,
            Ok(None) => continue,
            Err(e) => {
                error!(queue = %key, error = %e, "Error reading from Redis");
                tokio::select! {
                    () = cancel.cancelled() => break,
                    () = tokio::time::sleep(settings.error_backoff) => continue,
                }
            }
        };

        process_item(&handler, &key, &raw).await;
    }

    info!(queue = %key, "Processing stopped");
}

async fn process_item<H: QueueHandler>(handler: &H, key: &str, raw: &str) {
    let item = match handler.decode(raw.as_bytes()) {
        Ok(item) => item,
        Err(e) => {
            warn!(
                queue = %key,
                error = %e,
                payload_preview = %preview(raw),
                "Failed to decode queue item"
            );
            return;
        }
    };

    if let Err(e) = handler.handle(item).await {
        if e.is_client_error() {
            warn!(
                queue = %key,
                kind = e.kind(),
                error = %e,
                payload_preview = %preview(raw),
                "Rejected queue item"
            );
        } else {
            error!(
                queue = %key,
                kind = e.kind(),
                error = %e,
                payload_preview = %preview(raw),
                "Failed to process queue item"
            );
        }
    }
}

fn preview(raw: &str) -> String {
    raw.chars().take(PAYLOAD_PREVIEW_CHARS).collect()
}
