//! Move preconditions for Hex.
//!
//! Preconditions are checked before a move touches any state. The turn
//! owner is supplied by the caller because turn order belongs to the
//! controller, not to the rules.

use super::action::{Move, MoveError};
use super::state::GameState;
use super::types::Player;
use tracing::instrument;

/// Precondition: the cell is on the board and has no owner.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Checks the precondition.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        match state.board().owner(mov.cell)? {
            Some(owner) => Err(MoveError::CellOccupied {
                cell: mov.cell,
                owner,
            }),
            None => Ok(()),
        }
    }
}

/// Precondition: it is the moving player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks the precondition.
    #[instrument]
    pub fn check(mov: &Move, to_move: Player) -> Result<(), MoveError> {
        if mov.player != to_move {
            Err(MoveError::WrongPlayer {
                player: mov.player,
                to_move,
            })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: the cell is free and it's the player's turn.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &GameState, to_move: Player) -> Result<(), MoveError> {
        CellIsEmpty::check(mov, state)?;
        PlayersTurn::check(mov, to_move)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardError, CellId};

    #[test]
    fn test_empty_cell_passes() {
        let state = GameState::new(3).unwrap();
        let mov = Move::new(Player::A, CellId::new(5));
        assert!(LegalMove::check(&mov, &state, Player::A).is_ok());
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut state = GameState::new(3).unwrap();
        state.place(Move::new(Player::A, CellId::new(5))).unwrap();
        let mov = Move::new(Player::B, CellId::new(5));
        assert_eq!(
            LegalMove::check(&mov, &state, Player::B),
            Err(MoveError::CellOccupied {
                cell: CellId::new(5),
                owner: Player::A
            })
        );
    }

    #[test]
    fn test_wrong_turn_rejected() {
        let state = GameState::new(3).unwrap();
        let mov = Move::new(Player::B, CellId::new(5));
        assert!(matches!(
            LegalMove::check(&mov, &state, Player::A),
            Err(MoveError::WrongPlayer { .. })
        ));
    }

    #[test]
    fn test_out_of_range_reported() {
        let state = GameState::new(3).unwrap();
        let mov = Move::new(Player::A, CellId::new(10));
        assert!(matches!(
            CellIsEmpty::check(&mov, &state),
            Err(MoveError::OutOfRange(BoardError::OutOfRange { .. }))
        ));
    }
}
