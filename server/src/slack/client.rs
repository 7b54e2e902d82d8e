//! Slack Web API Client
//!
//! Thin JSON-over-HTTP client for the handful of Web API methods the relay
//! uses.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use liner_common::{ItemRef, PostResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::types::{AuthTestResponse, PostMessageBody, PostMessageResponse, ReactionBody};
use super::{ChatApi, OutboundMessage, SlackError};

/// Production Web API base URL.
pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

/// Per-request timeout for Web API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Who the bot token belongs to, as reported by `auth.test`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub team: String,
    pub user: String,
    pub user_id: String,
}

/// Slack Web API client authenticated with a bot token.
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    pub fn new(api_base: &str, token: &str) -> Result<Self, SlackError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(SlackError::Client)?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Verify the token. Called once at startup.
    pub async fn auth_test(&self) -> Result<AuthIdentity, SlackError> {
        let resp: AuthTestResponse = self.call("auth.test", &serde_json::json!({})).await?;
        Ok(AuthIdentity {
            team: resp.team,
            user: resp.user,
            user_id: resp.user_id,
        })
    }

    /// POST a JSON body to `{api_base}/{method}` and decode the payload of an
    /// `"ok": true` response.
    async fn call<B, R>(&self, method: &'static str, body: &B) -> Result<R, SlackError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{method}", self.api_base);
        debug!(method, "Calling Slack Web API");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|source| SlackError::Transport { method, source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SlackError::Status {
                method,
                status: status.as_u16(),
            });
        }

        let payload: Value = resp
            .json()
            .await
            .map_err(|source| SlackError::Transport { method, source })?;

        if !payload["ok"].as_bool().unwrap_or(false) {
            let error = payload["error"]
                .as_str()
                .unwrap_or("unknown_error")
                .to_string();
            return Err(SlackError::Api { method, error });
        }

        serde_json::from_value(payload).map_err(|e| SlackError::BadResponse {
            method,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ChatApi for SlackClient {
    async fn post_message(
        &self,
        channel: &str,
        message: &OutboundMessage,
    ) -> Result<PostResult, SlackError> {
        let body = PostMessageBody { channel, message };
        let resp: PostMessageResponse = self.call("chat.postMessage", &body).await?;
        Ok(PostResult {
            channel: resp.channel,
            ts: resp.ts,
        })
    }

    async fn add_reaction(&self, name: &str, item: &ItemRef) -> Result<(), SlackError> {
        let body = ReactionBody {
            name,
            channel: &item.channel,
            timestamp: &item.timestamp,
        };
        self.call::<_, Value>("reactions.add", &body).await?;
        Ok(())
    }

    async fn remove_reaction(&self, name: &str, item: &ItemRef) -> Result<(), SlackError> {
        let body = ReactionBody {
            name,
            channel: &item.channel,
            timestamp: &item.timestamp,
        };
        self.call::<_, Value>("reactions.remove", &body).await?;
        Ok(())
    }
}
