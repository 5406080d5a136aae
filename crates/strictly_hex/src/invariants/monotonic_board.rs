//! Monotonic board invariant: cells never change once claimed.

use super::super::{Board, GameState};
use super::Invariant;

/// Invariant: board cells are monotonic (never overwritten).
///
/// Verified by replaying the move history onto an empty board: every
/// replayed cell must be empty before placement and the result must match
/// the current board.
pub struct MonotonicBoardInvariant;

impl Invariant<GameState> for MonotonicBoardInvariant {
    fn holds(state: &GameState) -> bool {
        let Ok(mut reconstructed) = Board::new(state.board().size()) else {
            return false;
        };

        for mov in state.history() {
            if reconstructed.set_owner(mov.cell, mov.player).is_err() {
                return false;
            }
        }

        reconstructed == *state.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
