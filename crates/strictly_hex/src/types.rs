//! Core domain types for Hex.

use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Player A connects the left and right edges.
    #[display("A")]
    A,
    /// Player B connects the top and bottom edges.
    #[display("B")]
    B,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Human-readable description of the edges this player connects.
    pub fn target_edges(self) -> &'static str {
        match self {
            Player::A => "left-right",
            Player::B => "top-bottom",
        }
    }
}

/// Identifier of a cell, `1..=N²` in row-major order.
///
/// The id carries no board size; every board operation validates it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct CellId(usize);

impl CellId {
    /// Creates a cell id. Range is checked by the board, not here.
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<CellId> for usize {
    fn from(cell: CellId) -> Self {
        cell.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opponent_is_involution() {
        for player in Player::iter() {
            assert_ne!(player, player.opponent());
            assert_eq!(player, player.opponent().opponent());
        }
    }

    #[test]
    fn test_cell_id_conversions() {
        let cell: CellId = 7.into();
        assert_eq!(cell.get(), 7);
        assert_eq!(usize::from(cell), 7);
        assert_eq!(cell.to_string(), "7");
    }
}
