//! Push a reaction onto the SlackLiner reaction queue.
//!
//! Usage: `cargo run --example push_reaction -- <channel> <ts> <emoji> [--remove]`

use std::env;

use anyhow::{bail, Result};
use fred::interfaces::{ClientLike, ListInterface};
use liner_common::ReactionRequest;
use liner_server::queue::create_redis_client;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let [channel, ts, reaction, rest @ ..] = args.as_slice() else {
        bail!("Usage: push_reaction <channel> <ts> <emoji> [--remove]");
    };

    let request = ReactionRequest {
        reaction: reaction.trim_matches(':').to_string(),
        channel: channel.clone(),
        ts: ts.clone(),
        remove: rest.iter().any(|a| a == "--remove"),
    };

    let url = env::var("REDIS_URL").unwrap_or_else(|_| {
        format!(
            "redis://{}",
            env::var("REDIS_ADDR").unwrap_or_else(|_| "localhost:6379".into())
        )
    });
    let password = env::var("REDIS_PASSWORD").ok();
    let redis = create_redis_client(&url, password.as_deref()).await?;

    let key = env::var("REDIS_REACTION_LIST_KEY").unwrap_or_else(|_| "slack_reactions".into());
    let _: i64 = redis.rpush(&key, serde_json::to_string(&request)?).await?;
    let action = if request.remove { "remove" } else { "add" };
    println!("Queued {action} :{}: on {key}", request.reaction);

    redis.quit().await?;
    Ok(())
}
