//! Push a message onto the SlackLiner message queue.
//!
//! Usage: `cargo run --example push_message -- <channel> <text> [ttl_secs]`
//!
//! Reads `REDIS_URL` (or `REDIS_ADDR`), `REDIS_PASSWORD` and `REDIS_LIST_KEY`
//! the same way the server does.

use std::env;

use anyhow::{bail, Context, Result};
use fred::interfaces::{ClientLike, ListInterface};
use liner_common::PostRequest;
use liner_server::queue::create_redis_client;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let (Some(channel), Some(text)) = (args.next(), args.next()) else {
        bail!("Usage: push_message <channel> <text> [ttl_secs]");
    };
    let ttl = args
        .next()
        .map(|t| t.parse::<i64>())
        .transpose()
        .context("ttl_secs must be an integer")?
        .unwrap_or(0);

    let request = PostRequest {
        channel,
        text,
        ttl,
        ..PostRequest::default()
    };

    let redis = create_redis_client(&redis_url(), password().as_deref()).await?;
    let key = env::var("REDIS_LIST_KEY").unwrap_or_else(|_| "slack_messages".into());
    let len: i64 = redis.rpush(&key, serde_json::to_string(&request)?).await?;
    println!("Queued on {key} (length {len})");

    redis.quit().await?;
    Ok(())
}

fn redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| {
        format!(
            "redis://{}",
            env::var("REDIS_ADDR").unwrap_or_else(|_| "localhost:6379".into())
        )
    })
}

fn password() -> Option<String> {
    env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty())
}
