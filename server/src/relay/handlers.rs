//! Queue Handlers
//!
//! Bind the generic consumer loop to the message and reaction queues.

use std::sync::Arc;

use async_trait::async_trait;
use liner_common::{PostRequest, ReactionRequest};

use super::validate::{decode_post, decode_reaction};
use super::{Dispatcher, RelayError};
use crate::queue::QueueHandler;

/// Consumes the message queue.
#[derive(Clone)]
pub struct MessageHandler {
    dispatcher: Arc<Dispatcher>,
}

impl MessageHandler {
    #[must_use]
    pub const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl QueueHandler for MessageHandler {
    type Item = PostRequest;

    fn decode(&self, raw: &[u8]) -> Result<PostRequest, RelayError> {
        decode_post(raw)
    }

    async fn handle(&self, item: PostRequest) -> Result<(), RelayError> {
        self.dispatcher.post(&item).await.map(|_| ())
    }
}

/// Consumes the reaction queue.
#[derive(Clone)]
pub struct ReactionHandler {
    dispatcher: Arc<Dispatcher>,
}

impl ReactionHandler {
    #[must_use]
    pub const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl QueueHandler for ReactionHandler {
    type Item = ReactionRequest;

    fn decode(&self, raw: &[u8]) -> Result<ReactionRequest, RelayError> {
        decode_reaction(raw)
    }

    async fn handle(&self, item: ReactionRequest) -> Result<(), RelayError> {
        self.dispatcher.react(&item).await
    }
}
