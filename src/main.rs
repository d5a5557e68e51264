//! listbot - chat-driven shopping list bot
//!
//! Each chat owns one list, shown as a message of toggle buttons. Text sent
//! to the chat adds items, button presses tick them off, and the list is
//! kept in Redis keyed by chat id.

mod config;
mod controller;
mod list;
mod render;
mod session;
mod state_machine;
mod store;
mod telegram;
mod transport;

use config::BotConfig;
use controller::SessionController;
use std::sync::Arc;
use store::{RedisKv, SessionStore};
use telegram::{TelegramClient, UpdatePoller};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listbot=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = BotConfig::from_env()?;

    let kv = RedisKv::connect(&config.redis).await?;
    let client = Arc::new(TelegramClient::new(
        &config.api_base,
        &config.bot_token,
        config.poll_timeout,
    )?);

    let controller = Arc::new(SessionController::new(
        SessionStore::new(kv),
        Arc::clone(&client),
    ));

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
                return;
            }
            tracing::info!("Shutdown requested");
            shutdown.cancel();
        }
    });

    UpdatePoller::new(client, config.poll_timeout)
        .run(controller, shutdown)
        .await;

    Ok(())
}
