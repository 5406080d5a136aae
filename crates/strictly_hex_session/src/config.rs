//! Session configuration.
//!
//! A [`GameConfig`] is built once per session (from defaults, a TOML file
//! or CLI flags) and handed to the controller by value. Nothing here is
//! global or mutable after construction.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_hex::{MAX_BOARD_SIZE, MIN_BOARD_SIZE, Player};
use tracing::{debug, info, instrument, warn};

/// Who sits at a player's side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    /// Moves arrive from the human input source.
    Human,
    /// Moves are chosen by the move selector.
    Selector,
}

/// Game mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Two humans share the input source.
    #[display("human vs human")]
    HumanVsHuman,
    /// One human plays against the move selector.
    #[default]
    #[display("human vs selector")]
    HumanVsSelector,
}

impl GameMode {
    /// Seat of `player` in this mode.
    pub fn seat(self, player: Player, selector_player: Player) -> Seat {
        match self {
            GameMode::HumanVsSelector if player == selector_player => Seat::Selector,
            _ => Seat::Human,
        }
    }
}

/// How the first player of each game is chosen.
///
/// Parsing never fails: unrecognised values resolve to
/// [`FirstPlayerPolicy::FixedB`] so older settings keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FirstPlayerPolicy {
    /// Toggle from the previous game's first player.
    Alternate,
    /// Uniform over both players.
    Random,
    /// Player A always opens.
    FixedA,
    /// Player B always opens.
    #[default]
    FixedB,
}

impl FirstPlayerPolicy {
    /// Parses a policy name, falling back to `FixedB`.
    #[instrument]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "alternate" | "take_turns" | "take-turns" => Self::Alternate,
            "random" => Self::Random,
            "a" | "fixed_a" | "fixed-a" | "player_a" => Self::FixedA,
            "b" | "fixed_b" | "fixed-b" | "player_b" => Self::FixedB,
            _ => {
                warn!(value, "Unrecognized first player policy, using fixed_b");
                Self::FixedB
            }
        }
    }

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alternate => "alternate",
            Self::Random => "random",
            Self::FixedA => "a",
            Self::FixedB => "b",
        }
    }

    /// First player of the next game, given the previous game's.
    pub fn next_first_player<R: Rng + ?Sized>(self, previous: Player, rng: &mut R) -> Player {
        match self {
            Self::Alternate => previous.opponent(),
            Self::Random => {
                if rng.gen_bool(0.5) {
                    Player::B
                } else {
                    Player::A
                }
            }
            Self::FixedA => Player::A,
            Self::FixedB => Player::B,
        }
    }
}

impl From<String> for FirstPlayerPolicy {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FirstPlayerPolicy> for String {
    fn from(policy: FirstPlayerPolicy) -> Self {
        policy.as_str().to_string()
    }
}

impl std::str::FromStr for FirstPlayerPolicy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for FirstPlayerPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Board edge length `N`.
    board_size: usize,

    /// Human vs human or human vs selector.
    mode: GameMode,

    /// First player policy.
    first_player: FirstPlayerPolicy,

    /// Player controlled by the selector in `HumanVsSelector` mode.
    selector_player: Player,

    /// Seed for the session RNG (random first player).
    #[setters(strip_option)]
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

/// Default board edge length.
pub const DEFAULT_BOARD_SIZE: usize = 11;

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            mode: GameMode::default(),
            first_player: FirstPlayerPolicy::default(),
            selector_player: Player::B,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Creates a configuration with default selector player and no seed.
    #[instrument]
    pub fn new(board_size: usize, mode: GameMode, first_player: FirstPlayerPolicy) -> Self {
        Self {
            board_size,
            mode,
            first_player,
            ..Self::default()
        }
    }

    /// Seat of `player` under this configuration.
    pub fn seat(&self, player: Player) -> Seat {
        self.mode.seat(player, self.selector_player)
    }

    /// Checks value ranges.
    #[instrument(skip(self), fields(board_size = self.board_size))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::new(format!(
                "board_size must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            )));
        }
        Ok(())
    }

    /// Parses and validates TOML.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(
            board_size = config.board_size,
            mode = %config.mode,
            first_player = %config.first_player,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
