//! `SlackLiner` Server - Main Entry Point
//!
//! Relays Redis-queued and HTTP-submitted messages and reactions to Slack.

use std::sync::Arc;

use anyhow::{Context, Result};
use fred::interfaces::ClientLike as _;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use liner_server::api::{self, AppState};
use liner_server::config::Config;
use liner_server::observability;
use liner_server::queue::{
    self, consumer, ConsumerSettings, QueueSource, RedisNoticePublisher, RedisQueue,
};
use liner_server::relay::{Dispatcher, MessageHandler, ReactionHandler};
use liner_server::slack::SlackClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    observability::init_tracing();
    let config = Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting SlackLiner Server"
    );

    // Initialize Redis
    info!("Connecting to Redis...");
    let redis = queue::create_redis_client(&config.redis_url, config.redis_password.as_deref())
        .await
        .context("Failed to connect to Redis")?;

    // Initialize Slack client and verify the token
    let slack = SlackClient::new(&config.slack_api_url, &config.slack_bot_token)?;
    let identity = slack
        .auth_test()
        .await
        .context("Failed to authenticate with Slack")?;
    info!(team = %identity.team, user = %identity.user, "Slack authentication successful");

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(slack),
        Arc::new(RedisNoticePublisher::new(
            redis.clone(),
            config.timebomb_channel.clone(),
        )),
    ));

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel.clone()));

    // Start queue consumers, each blocking on its own connection so that
    // neither BLPOP holds up the other or the notice PUBLISH
    let message_queue = Arc::new(
        RedisQueue::connect(&redis)
            .await
            .context("Failed to open message queue connection")?,
    );
    let reaction_queue = Arc::new(
        RedisQueue::connect(&redis)
            .await
            .context("Failed to open reaction queue connection")?,
    );
    let settings = ConsumerSettings::from(&config);
    let message_loop = tokio::spawn(consumer::run(
        message_queue.clone() as Arc<dyn QueueSource>,
        config.message_queue_key.clone(),
        MessageHandler::new(dispatcher.clone()),
        settings,
        cancel.clone(),
    ));
    let reaction_loop = tokio::spawn(consumer::run(
        reaction_queue.clone() as Arc<dyn QueueSource>,
        config.reaction_queue_key.clone(),
        ReactionHandler::new(dispatcher.clone()),
        settings,
        cancel.clone(),
    ));

    // Start HTTP server
    let app = api::create_router(AppState::new(dispatcher));
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!(address = %config.bind_address, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.clone().cancelled_owned())
        .await?;

    // Give the consumers time to finish the item they are on
    let drained = tokio::time::timeout(config.shutdown_grace, async {
        let _ = tokio::join!(message_loop, reaction_loop);
    })
    .await;
    if drained.is_err() {
        warn!(
            grace_secs = config.shutdown_grace.as_secs_f64(),
            "Queue consumers still busy after grace period, exiting anyway"
        );
    }

    for queue in [&message_queue, &reaction_queue] {
        if let Err(e) = queue.close().await {
            warn!(error = %e, "Failed to close queue connection");
        }
    }
    if let Err(e) = redis.quit().await {
        warn!(error = %e, "Failed to close Redis connection");
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM, then cancel everything.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Received shutdown signal, shutting down gracefully...");
    cancel.cancel();
}
