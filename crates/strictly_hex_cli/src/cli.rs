//! Command-line interface for strictly_hex.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strictly_hex_session::{ConfigError, FirstPlayerPolicy, GameConfig, GameMode};
use tracing::{debug, instrument};

/// Strictly Hex - play Hex in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_hex")]
#[command(about = "Hex against a friend or a move selector", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game on stdin/stdout
    Play {
        /// Path to a TOML game config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Board edge length
        #[arg(long)]
        size: Option<usize>,

        /// Who plays
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// First player policy (alternate, random, a, b)
        #[arg(long)]
        first: Option<FirstPlayerPolicy>,

        /// RNG seed for the random policy and the selector
        #[arg(long)]
        seed: Option<u64>,

        /// Artificial selector delay in milliseconds
        #[arg(long, default_value = "300")]
        think_ms: u64,
    },

    /// Print the default configuration as TOML
    Config,
}

/// Game mode as typed on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Human vs human
    Hvh,
    /// Human vs selector
    Hvs,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Hvh => GameMode::HumanVsHuman,
            ModeArg::Hvs => GameMode::HumanVsSelector,
        }
    }
}

/// Loads the config file (or defaults) and applies flag overrides.
#[instrument]
pub fn resolve_config(
    path: Option<&PathBuf>,
    size: Option<usize>,
    mode: Option<ModeArg>,
    first: Option<FirstPlayerPolicy>,
    seed: Option<u64>,
) -> Result<GameConfig, ConfigError> {
    let mut config = match path {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(size) = size {
        config = config.with_board_size(size);
    }
    if let Some(mode) = mode {
        config = config.with_mode(mode.into());
    }
    if let Some(first) = first {
        config = config.with_first_player(first);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    config.validate()?;
    debug!(?config, "Resolved game config");
    Ok(config)
}
