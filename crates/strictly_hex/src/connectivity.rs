//! Connectivity engine: one union-find forest per player.
//!
//! Each forest has `N² + 2` nodes. Node `0` is the player's START edge,
//! nodes `1..=N²` are the cells and node `N² + 1` is the END edge. Edge
//! cells are joined to their terminal node up front, so "has this player
//! won" reduces to a single START/END connectivity query.

use super::board::{Board, BoardError};
use super::types::{CellId, Player};
use super::union_find::UnionFind;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

const START: usize = 0;

/// Win detection for both players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connectivity {
    size: usize,
    /// Player A: left column to START, right column to END.
    forest_a: UnionFind,
    /// Player B: top row to START, bottom row to END.
    forest_b: UnionFind,
}

impl Connectivity {
    /// Builds both forests for an `n x n` board with edges pre-joined.
    #[instrument]
    pub fn new(n: usize) -> Self {
        Self {
            size: n,
            forest_a: Self::edge_forest(n, Player::A),
            forest_b: Self::edge_forest(n, Player::B),
        }
    }

    fn edge_forest(n: usize, player: Player) -> UnionFind {
        let end = n * n + 1;
        let mut forest = UnionFind::new(n * n + 2);
        for i in 0..n {
            let (start_cell, end_cell) = match player {
                // First and last cell of row i.
                Player::A => (i * n + 1, (i + 1) * n),
                // Column i in the first and last row.
                Player::B => (i + 1, (n - 1) * n + i + 1),
            };
            forest.union(START, start_cell);
            forest.union(end, end_cell);
        }
        forest
    }

    fn forest(&self, player: Player) -> &UnionFind {
        match player {
            Player::A => &self.forest_a,
            Player::B => &self.forest_b,
        }
    }

    fn forest_mut(&mut self, player: Player) -> &mut UnionFind {
        match player {
            Player::A => &mut self.forest_a,
            Player::B => &mut self.forest_b,
        }
    }

    fn end(&self) -> usize {
        self.size * self.size + 1
    }

    /// Joins `cell` with each neighbour already owned by `player`.
    ///
    /// Call after `board` has recorded `player` as the owner of the
    /// previously empty `cell`. Only `player`'s forest changes.
    #[instrument(skip(self, board))]
    pub fn record_move(
        &mut self,
        board: &Board,
        cell: CellId,
        player: Player,
    ) -> Result<(), BoardError> {
        let neighbors = board.neighbors(cell)?;
        debug_assert_eq!(board.size(), self.size, "board and connectivity sizes differ");
        debug_assert_eq!(board.owner(cell), Ok(Some(player)));

        for neighbor in neighbors {
            if board.owner(neighbor)? == Some(player) {
                self.forest_mut(player).union(cell.get(), neighbor.get());
                trace!(%neighbor, "Joined with friendly neighbour");
            }
        }
        Ok(())
    }

    /// Returns true if `player`'s two target edges are connected.
    pub fn is_winner(&self, player: Player) -> bool {
        self.forest(player).connected(START, self.end())
    }

    /// Rebuilds both forests. Only valid together with a board reset.
    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(board: &mut Board, conn: &mut Connectivity, player: Player, ids: &[usize]) {
        for &id in ids {
            let cell = CellId::new(id);
            board.set_owner(cell, player).unwrap();
            conn.record_move(board, cell, player).unwrap();
        }
    }

    #[test]
    fn test_minimal_win_two_by_two() {
        let mut board = Board::new(2).unwrap();
        let mut conn = Connectivity::new(2);

        play(&mut board, &mut conn, Player::A, &[1]);
        assert!(!conn.is_winner(Player::A));

        play(&mut board, &mut conn, Player::A, &[2]);
        assert!(conn.is_winner(Player::A));
        assert!(!conn.is_winner(Player::B));
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        let conn = Connectivity::new(5);
        assert!(!conn.is_winner(Player::A));
        assert!(!conn.is_winner(Player::B));
    }

    #[test]
    fn test_player_b_wins_top_to_bottom() {
        let mut board = Board::new(3).unwrap();
        let mut conn = Connectivity::new(3);
        // 2 -> 5 -> 8 runs straight down the middle column.
        play(&mut board, &mut conn, Player::B, &[2, 8]);
        assert!(!conn.is_winner(Player::B));
        play(&mut board, &mut conn, Player::B, &[5]);
        assert!(conn.is_winner(Player::B));
        assert!(!conn.is_winner(Player::A));
    }

    #[test]
    fn test_diagonal_link_counts() {
        let mut board = Board::new(3).unwrap();
        let mut conn = Connectivity::new(3);
        // 3 (0,2) -> 5 (1,1) -> 7 (2,0) uses the (+1,-1) neighbour twice.
        play(&mut board, &mut conn, Player::B, &[3, 5, 7]);
        assert!(conn.is_winner(Player::B));
    }

    #[test]
    fn test_non_adjacent_diagonal_does_not_connect() {
        let mut board = Board::new(3).unwrap();
        let mut conn = Connectivity::new(3);
        // 1 (0,0) and 5 (1,1) are not hex neighbours; neither are 5 and 9.
        play(&mut board, &mut conn, Player::B, &[1, 5, 9]);
        assert!(!conn.is_winner(Player::B));
    }

    #[test]
    fn test_opponent_stones_do_not_bridge() {
        let mut board = Board::new(2).unwrap();
        let mut conn = Connectivity::new(2);
        play(&mut board, &mut conn, Player::A, &[1]);
        play(&mut board, &mut conn, Player::B, &[2]);
        assert!(!conn.is_winner(Player::A));
        assert!(!conn.is_winner(Player::B));
    }

    #[test]
    fn test_moves_only_touch_mover_forest() {
        let mut board = Board::new(3).unwrap();
        let mut conn = Connectivity::new(3);
        let before_b = conn.forest_b.clone();
        play(&mut board, &mut conn, Player::A, &[4, 5]);
        assert_eq!(conn.forest_b, before_b);
    }

    #[test]
    fn test_reset_restores_fresh_forests() {
        let mut board = Board::new(2).unwrap();
        let mut conn = Connectivity::new(2);
        play(&mut board, &mut conn, Player::A, &[1, 2]);
        conn.reset();
        assert_eq!(conn, Connectivity::new(2));
    }

    #[test]
    fn test_out_of_range_is_error() {
        let board = Board::new(2).unwrap();
        let mut conn = Connectivity::new(2);
        assert!(conn.record_move(&board, CellId::new(5), Player::A).is_err());
    }
}
