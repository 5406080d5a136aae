//! Whole-game properties of a Hex [`GameState`](crate::GameState).
//!
//! Each invariant is a zero-sized type that inspects a state after the
//! fact. The turn controller runs [`HexInvariants`] against the candidate
//! state of every move in debug builds, before committing it.

/// A property of `S` that no sequence of legal moves may break.
pub trait Invariant<S> {
    /// True if `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// Short sentence naming the property, used in violation reports.
    fn description() -> &'static str;
}

/// One broken invariant, identified by its description.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{description}")]
pub struct InvariantViolation {
    /// Description of the broken property.
    pub description: String,
}

impl InvariantViolation {
    /// Wraps an invariant description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several invariants checked in one call.
///
/// Tuples of two or three [`Invariant`]s implement this; every member is
/// evaluated even after the first failure.
pub trait InvariantSet<S> {
    /// Ok if every member holds, otherwise one violation per failing member.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Appends a violation for `I` if it does not hold.
fn record<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn into_result(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1: Invariant<S>, I2: Invariant<S>> InvariantSet<S> for (I1, I2) {
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        record::<S, I1>(state, &mut violations);
        record::<S, I2>(state, &mut violations);
        into_result(violations)
    }
}

impl<S, I1: Invariant<S>, I2: Invariant<S>, I3: Invariant<S>> InvariantSet<S> for (I1, I2, I3) {
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        record::<S, I1>(state, &mut violations);
        record::<S, I2>(state, &mut violations);
        record::<S, I3>(state, &mut violations);
        into_result(violations)
    }
}

pub mod alternating_turn;
pub mod monotonic_board;
pub mod single_winner;

pub use alternating_turn::AlternatingTurnInvariant;
pub use monotonic_board::MonotonicBoardInvariant;
pub use single_winner::SingleWinnerInvariant;

/// Every invariant of a Hex game.
pub type HexInvariants = (
    MonotonicBoardInvariant,
    AlternatingTurnInvariant,
    SingleWinnerInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellId, GameState, Move, Player};

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        let state = GameState::new(5).unwrap();
        assert!(HexInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let moves = [
            Move::new(Player::A, CellId::new(13)),
            Move::new(Player::B, CellId::new(7)),
            Move::new(Player::A, CellId::new(8)),
        ];
        let state = GameState::replay(5, &moves).unwrap();
        assert!(HexInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_each_violation() {
        // Same player twice in a row.
        let moves = [
            Move::new(Player::A, CellId::new(1)),
            Move::new(Player::A, CellId::new(2)),
        ];
        let state = GameState::replay(3, &moves).unwrap();
        let violations = HexInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            AlternatingTurnInvariant::description()
        );
    }

    #[test]
    fn test_two_invariants_as_set() {
        let state = GameState::new(3).unwrap();
        type TwoInvariants = (MonotonicBoardInvariant, SingleWinnerInvariant);
        assert!(TwoInvariants::check_all(&state).is_ok());
    }

    struct Never;
    struct Always;

    impl Invariant<GameState> for Never {
        fn holds(_: &GameState) -> bool {
            false
        }
        fn description() -> &'static str {
            "never holds"
        }
    }

    impl Invariant<GameState> for Always {
        fn holds(_: &GameState) -> bool {
            true
        }
        fn description() -> &'static str {
            "always holds"
        }
    }

    #[test]
    fn test_every_failing_member_is_reported_in_order() {
        let state = GameState::new(3).unwrap();
        let violations = <(Never, Always, Never)>::check_all(&state).unwrap_err();
        assert_eq!(
            violations,
            vec![
                InvariantViolation::new("never holds"),
                InvariantViolation::new("never holds"),
            ]
        );
        assert!(<(Always, Always)>::check_all(&state).is_ok());
    }
}
