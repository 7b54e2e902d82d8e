//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{ensure, Context, Result};
use std::env;
use std::time::Duration;

use crate::slack::DEFAULT_API_BASE;

/// Server configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// HTTP bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Redis connection URL
    pub redis_url: String,

    /// Redis password (optional, overrides any password in `redis_url`)
    pub redis_password: Option<String>,

    /// Redis list holding message requests
    pub message_queue_key: String,

    /// Redis list holding reaction requests
    pub reaction_queue_key: String,

    /// Redis pub/sub channel for TimeBomb deletion notices
    pub timebomb_channel: String,

    /// Slack bot token (`xoxb-...`)
    pub slack_bot_token: String,

    /// Slack Web API base URL
    pub slack_api_url: String,

    /// Bounded wait for each queue pop (default: 5s)
    pub queue_pop_timeout: Duration,

    /// Delay after a failed queue pop (default: 1s)
    pub queue_error_backoff: Duration,

    /// Time allowed for in-flight work after a shutdown signal (default: 1s)
    pub shutdown_grace: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("redis_url", &self.redis_url)
            .field("message_queue_key", &self.message_queue_key)
            .field("reaction_queue_key", &self.reaction_queue_key)
            .field("timebomb_channel", &self.timebomb_channel)
            .field("slack_api_url", &self.slack_api_url)
            .field("queue_pop_timeout", &self.queue_pop_timeout)
            .field("queue_error_backoff", &self.queue_error_backoff)
            .field("shutdown_grace", &self.shutdown_grace)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let slack_bot_token = env::var("SLACK_BOT_TOKEN")
            .ok()
            .filter(|v| !v.is_empty())
            .context("SLACK_BOT_TOKEN environment variable is required")?;

        // REDIS_URL wins; otherwise build one from REDIS_ADDR.
        let redis_url = env::var("REDIS_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| format!("redis://{}", var_or("REDIS_ADDR", "localhost:6379")));

        // BLPOP treats 0 as "block forever", which would hide cancellation.
        let queue_pop_timeout = secs_or("QUEUE_POP_TIMEOUT_SECS", 5);
        ensure!(
            !queue_pop_timeout.is_zero(),
            "QUEUE_POP_TIMEOUT_SECS must be at least 1"
        );

        Ok(Self {
            bind_address: var_or("HTTP_ADDR", "0.0.0.0:8080"),
            redis_url,
            redis_password: env::var("REDIS_PASSWORD").ok().filter(|v| !v.is_empty()),
            message_queue_key: var_or("REDIS_LIST_KEY", "slack_messages"),
            reaction_queue_key: var_or("REDIS_REACTION_LIST_KEY", "slack_reactions"),
            timebomb_channel: var_or("TIMEBOMB_REDIS_CHANNEL", "timebomb-messages"),
            slack_bot_token,
            slack_api_url: var_or("SLACK_API_URL", DEFAULT_API_BASE),
            queue_pop_timeout,
            queue_error_backoff: secs_or("QUEUE_ERROR_BACKOFF_SECS", 1),
            shutdown_grace: secs_or("SHUTDOWN_GRACE_SECS", 1),
        })
    }

    /// Create a default configuration for testing.
    ///
    /// Redis: `docker run -d --name liner-test-redis -p 6380:6379 redis:7`
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            redis_url: "redis://localhost:6380".into(),
            redis_password: None,
            message_queue_key: "test:slack_messages".into(),
            reaction_queue_key: "test:slack_reactions".into(),
            timebomb_channel: "test:timebomb-messages".into(),
            slack_bot_token: "xoxb-test".into(),
            slack_api_url: DEFAULT_API_BASE.into(),
            queue_pop_timeout: Duration::from_secs(1),
            queue_error_backoff: Duration::from_millis(100),
            shutdown_grace: Duration::from_secs(1),
        }
    }
}

/// Read a variable, treating unset and empty the same.
fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.into())
}

fn secs_or(key: &str, default: u64) -> Duration {
    Duration::from_secs(
        env::var(key)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default),
    )
}
