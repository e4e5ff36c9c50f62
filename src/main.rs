//! Herald - DM-driven announcement bot for Discord
//!
//! The bot's owner DMs it free-form text with `key: value` directive
//! lines; Herald resolves the target channel and roles by fuzzy name
//! matching and posts the text as a styled embed announcement,
//! optionally previewed, delayed, or edited in place later.

mod announce;
mod common;
mod config;
mod directive;
mod discord;
mod resolve;

use anyhow::Result;
use serenity::prelude::*;
use tokio::signal;
use tracing::{error, info};

use config::env::get_config_path;
use discord::AnnounceHandler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Herald v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = config::load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("Please ensure {} exists and is properly formatted.", config_path);
        e
    })?;

    info!("Configuration loaded successfully");
    info!("  Owner: {}", config.discord.owner);

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS;

    let token = config.discord.token.clone();
    let mut client = Client::builder(&token, intents)
        .event_handler(AnnounceHandler::new(config))
        .await?;

    // Shut the gateway down cleanly on Ctrl+C / SIGTERM.
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received - closing gateway connection...");
        shard_manager.shutdown_all().await;
    });

    info!("Starting Discord client...");
    client.start().await?;

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
