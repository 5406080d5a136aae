//! Single winner invariant: both players can never have won at once.

use super::super::{GameState, Player};
use super::Invariant;

/// Invariant: at most one player has connected their edges.
pub struct SingleWinnerInvariant;

impl Invariant<GameState> for SingleWinnerInvariant {
    fn holds(state: &GameState) -> bool {
        !(state.is_winner(Player::A) && state.is_winner(Player::B))
    }

    fn description() -> &'static str {
        "At most one player has a winning chain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellId, Move};

    #[test]
    fn test_holds_after_win() {
        let moves = [
            Move::new(Player::A, CellId::new(1)),
            Move::new(Player::B, CellId::new(3)),
            Move::new(Player::A, CellId::new(2)),
        ];
        let state = GameState::replay(2, &moves).unwrap();
        assert!(state.is_winner(Player::A));
        assert!(SingleWinnerInvariant::holds(&state));
    }

    #[test]
    fn test_blocked_chain_leaves_no_winner() {
        // Neither side has a complete chain yet.
        let moves = [
            Move::new(Player::A, CellId::new(4)),
            Move::new(Player::B, CellId::new(2)),
            Move::new(Player::A, CellId::new(7)),
            Move::new(Player::B, CellId::new(5)),
        ];
        let state = GameState::replay(3, &moves).unwrap();
        assert_eq!(state.winner(), None);
        assert!(SingleWinnerInvariant::holds(&state));
    }
}
