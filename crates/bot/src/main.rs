//! Balance bot
//!
//! Periodically samples a Meta ad account's outstanding balance and sends
//! escalating Telegram alerts as it approaches the configured spending
//! threshold. Each alert tier fires exactly once per billing cycle, across
//! restarts; the cycle is ended with the administrative `/reset` command.

mod commands;
mod config;
mod monitor;
mod server;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use balance::GraphClient;
use notify::{TelegramApi, TelegramChannel};

use crate::config::Config;
use crate::monitor::Monitor;

/// Ad account balance monitor with escalating Telegram alerts.
#[derive(Parser)]
#[command(name = "balance-bot")]
#[command(about = "Monitor ad account balance and alert on threshold tiers")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// State file path (overrides STATE_FILE)
    #[arg(long)]
    state: Option<PathBuf>,

    /// Keep-alive server port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Poll interval in seconds (overrides POLL_INTERVAL_SECS)
    #[arg(long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("balance_bot=debug,alerts=debug,balance=debug,notify=debug,info")
    } else {
        EnvFilter::new("balance_bot=info,alerts=info,balance=info,notify=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(state) = cli.state {
        config.state_path = state;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(secs) = cli.interval {
        config.poll_interval = Duration::from_secs(secs);
    }

    info!(
        account = %config.account_id,
        threshold = config.threshold,
        interval_secs = config.poll_interval.as_secs(),
        state_file = %config.state_path.display(),
        "Starting balance bot"
    );

    let api = TelegramApi::new(&config.bot_token);
    let source = Arc::new(GraphClient::new(
        config.account_id.clone(),
        config.access_token.clone(),
    ));
    let channel = Arc::new(TelegramChannel::new(api.clone(), config.chat_id));

    let port = config.port;
    tokio::spawn(async move {
        if let Err(e) = server::serve(port).await {
            error!(error = %e, "Keep-alive server exited");
        }
    });

    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(commands::poll_updates(api.clone(), tx));

    Monitor::new(config, source, channel, api).run(rx).await;

    Ok(())
}
