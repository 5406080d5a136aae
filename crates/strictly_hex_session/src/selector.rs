//! Move selectors: the non-human side of a session.

use derive_more::Display;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Mutex;
use std::time::Duration;
use strictly_hex::{Board, CellId, Player};
use tracing::{debug, instrument};

/// Errors a selector may report instead of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SelectorError {
    /// Every cell is owned.
    #[display("No empty cell left for {}", _0)]
    NoMoves(Player),
    /// Selector-specific failure.
    #[display("Selector failed: {}", _0)]
    Failed(String),
}

impl std::error::Error for SelectorError {}

/// Chooses moves for one side.
///
/// Receives a snapshot of the board; it never sees the connectivity
/// engine and never mutates game state. The returned cell must be empty
/// and in range, otherwise the controller treats the result as a fatal
/// integration error.
#[async_trait::async_trait]
pub trait MoveSelector: Send + Sync {
    /// Picks a cell for `player` on `board`.
    async fn select(&self, board: &Board, player: Player) -> Result<CellId, SelectorError>;

    /// Display name.
    fn name(&self) -> &str;
}

/// Picks the lowest-numbered empty cell.
#[derive(Debug, Clone)]
pub struct FirstFreeSelector {
    name: String,
}

impl FirstFreeSelector {
    /// Creates a new first-free selector.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for FirstFreeSelector {
    fn default() -> Self {
        Self::new("first-free")
    }
}

#[async_trait::async_trait]
impl MoveSelector for FirstFreeSelector {
    #[instrument(skip(self, board), fields(selector = %self.name))]
    async fn select(&self, board: &Board, player: Player) -> Result<CellId, SelectorError> {
        let cell = board
            .empty_cells()
            .first()
            .copied()
            .ok_or(SelectorError::NoMoves(player))?;
        debug!(%cell, "Selector chose cell");
        Ok(cell)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Opens in the centre, then picks uniformly among empty cells.
#[derive(Debug)]
pub struct RandomSelector {
    name: String,
    rng: Mutex<StdRng>,
    think_time: Duration,
}

impl RandomSelector {
    /// Creates a selector seeded from entropy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: Mutex::new(StdRng::from_entropy()),
            think_time: Duration::ZERO,
        }
    }

    /// Creates a reproducible selector.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            think_time: Duration::ZERO,
        }
    }

    /// Adds an artificial delay before each answer.
    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = think_time;
        self
    }

    fn pick(&self, board: &Board, player: Player) -> Result<CellId, SelectorError> {
        if board.is_empty() {
            return Ok(board.center_cell());
        }
        let empty = board.empty_cells();
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        empty
            .choose(&mut *rng)
            .copied()
            .ok_or(SelectorError::NoMoves(player))
    }
}

#[async_trait::async_trait]
impl MoveSelector for RandomSelector {
    #[instrument(skip(self, board), fields(selector = %self.name))]
    async fn select(&self, board: &Board, player: Player) -> Result<CellId, SelectorError> {
        let cell = self.pick(board, player)?;
        if !self.think_time.is_zero() {
            tokio::time::sleep(self.think_time).await;
        }
        debug!(%cell, "Selector chose cell");
        Ok(cell)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
