//! Game state: board and connectivity kept in lockstep.

use super::action::Move;
use super::board::{Board, BoardError};
use super::connectivity::Connectivity;
use super::types::Player;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Board, connectivity and move history of a single game.
///
/// The board and both connectivity forests are created and reset
/// together; there is no way to reset one without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    connectivity: Connectivity,
    history: Vec<Move>,
}

impl GameState {
    /// Creates an empty `size x size` game.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, BoardError> {
        let board = Board::new(size)?;
        Ok(Self {
            board,
            connectivity: Connectivity::new(size),
            history: Vec::new(),
        })
    }

    /// Replays `moves` onto a fresh board.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(size: usize, moves: &[Move]) -> Result<Self, BoardError> {
        let mut state = Self::new(size)?;
        for mov in moves {
            state.place(*mov)?;
        }
        Ok(state)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the connectivity engine.
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Returns the move history in placement order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Claims `mov.cell` for `mov.player` and updates connectivity.
    ///
    /// Turn order is not checked here. Nothing changes on error.
    #[instrument(skip(self), fields(player = %mov.player, cell = %mov.cell))]
    pub fn place(&mut self, mov: Move) -> Result<(), BoardError> {
        self.board.set_owner(mov.cell, mov.player)?;
        self.connectivity
            .record_move(&self.board, mov.cell, mov.player)?;
        self.history.push(mov);
        Ok(())
    }

    /// Returns true if `player` has connected their edges.
    pub fn is_winner(&self, player: Player) -> bool {
        self.connectivity.is_winner(player)
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        Player::iter().find(|&player| self.is_winner(player))
    }

    /// Clears board, connectivity and history together.
    ///
    /// Returns the cleared moves in placement order.
    #[instrument(skip(self), fields(moves = self.history.len()))]
    pub fn reset(&mut self) -> Vec<Move> {
        self.board.reset();
        self.connectivity.reset();
        let cleared = std::mem::take(&mut self.history);
        debug!("Game state reset");
        cleared
    }
}
