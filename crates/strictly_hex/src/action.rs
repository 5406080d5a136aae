//! First-class move type for Hex.
//!
//! Moves are domain events, not side effects. They represent the
//! player's intent and can be validated independently of execution.

use super::board::BoardError;
use super::types::{CellId, Player};
use serde::{Deserialize, Serialize};

/// A move in Hex: a player claiming a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The cell being claimed.
    pub cell: CellId,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.cell)
    }
}

/// Error that can occur when validating a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell is not on the board.
    #[display("{}", _0)]
    OutOfRange(BoardError),

    /// The cell already has an owner.
    #[display("Cell {cell} is already owned by player {owner}")]
    CellOccupied {
        /// Cell that was requested.
        cell: CellId,
        /// Its current owner.
        owner: Player,
    },

    /// It's not this player's turn.
    #[display("It's not player {player}'s turn (player {to_move} to move)")]
    WrongPlayer {
        /// Player who tried to move.
        player: Player,
        /// Player whose turn it is.
        to_move: Player,
    },
}

impl std::error::Error for MoveError {}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::Occupied { cell, owner } => MoveError::CellOccupied { cell, owner },
            other => MoveError::OutOfRange(other),
        }
    }
}
