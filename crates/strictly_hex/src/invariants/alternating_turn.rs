//! Alternating turn invariant: A and B take turns, whoever starts.

use super::super::GameState;
use super::Invariant;

/// Invariant: consecutive moves belong to different players.
///
/// Either player may open, so only alternation is checked.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        state
            .history()
            .windows(2)
            .all(|pair| pair[0].player != pair[1].player)
    }

    fn description() -> &'static str {
        "Players alternate turns"
    }
}
