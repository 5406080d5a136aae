//! Strictly Hex session - turn sequencing for Hex.
//!
//! Wraps the pure rules in [`strictly_hex`] with a turn controller that
//! accepts moves from a human input source and an asynchronous
//! [`MoveSelector`], publishes [`GameEvent`]s, and guarantees that at most
//! one selector computation is in flight.
//!
//! # Architecture
//!
//! - **Config**: immutable per-session settings, loadable from TOML
//! - **Selector**: async trait for computer players plus reference impls
//! - **Controller**: phase machine, exclusivity guard, restart
//! - **Driver**: runs a controller on its own task behind a handle

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod driver;
mod events;
mod selector;

pub use config::{ConfigError, DEFAULT_BOARD_SIZE, FirstPlayerPolicy, GameConfig, GameMode, Seat};
pub use controller::{ControllerError, MoveOutcome, Phase, Rejection, TurnController};
pub use driver::{SessionError, SessionHandle, SessionSnapshot, spawn_session};
pub use events::GameEvent;
pub use selector::{FirstFreeSelector, MoveSelector, RandomSelector, SelectorError};
