//! Slack Web API
//!
//! The three calls the relay makes, behind [`ChatApi`] so the dispatcher can
//! be driven by an in-memory fake in tests.

mod client;
mod error;
mod types;

use async_trait::async_trait;
use liner_common::{ItemRef, PostResult};

pub use client::{AuthIdentity, SlackClient, DEFAULT_API_BASE};
pub use error::SlackError;
pub use types::{Block, OutboundMessage};

#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `chat.postMessage`
    async fn post_message(
        &self,
        channel: &str,
        message: &OutboundMessage,
    ) -> Result<PostResult, SlackError>;

    /// `reactions.add`
    async fn add_reaction(&self, name: &str, item: &ItemRef) -> Result<(), SlackError>;

    /// `reactions.remove`
    async fn remove_reaction(&self, name: &str, item: &ItemRef) -> Result<(), SlackError>;
}
