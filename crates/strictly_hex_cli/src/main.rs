//! Strictly Hex - terminal front end.

#![warn(missing_docs)]

mod cli;
mod terminal;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::time::Duration;
use strictly_hex_session::GameConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            size,
            mode,
            first,
            seed,
            think_ms,
        } => {
            init_tracing();
            let config = cli::resolve_config(config.as_ref(), size, mode, first, seed)?;
            info!(
                size = config.board_size(),
                mode = %config.mode(),
                first_player = %config.first_player(),
                "Starting terminal game"
            );
            terminal::play(config, Duration::from_millis(think_ms)).await
        }
        Command::Config => {
            print!("{}", GameConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

/// Logs go to stderr so the board on stdout stays readable.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_hex=debug,strictly_hex_session=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
