//! Strictly Hex - pure game logic for Hex.
//!
//! Hex is played on an `N x N` rhombus of hexagonal cells. Player A
//! connects the left and right edges, Player B connects the top and
//! bottom edges. The first player to complete a chain wins.
//!
//! # Architecture
//!
//! - **Board**: cell ownership, bounds checking and hexagonal adjacency
//! - **Connectivity**: one union-find forest per player with synthetic
//!   edge nodes, answering "has this player won" in near-constant time
//! - **GameState**: board and connectivity kept in lockstep, plus history
//! - **Contracts / Invariants**: move preconditions and state invariants
//!
//! # Example
//!
//! ```
//! use strictly_hex::{CellId, GameState, Move, Player};
//!
//! # fn main() -> Result<(), strictly_hex::BoardError> {
//! let mut state = GameState::new(2)?;
//! state.place(Move::new(Player::A, CellId::new(1)))?;
//! state.place(Move::new(Player::A, CellId::new(2)))?;
//! assert!(state.is_winner(Player::A));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod connectivity;
mod contracts;
pub mod invariants;
mod state;
mod types;
mod union_find;

pub use action::{Move, MoveError};
pub use board::{Board, BoardError, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use connectivity::Connectivity;
pub use contracts::{CellIsEmpty, LegalMove, PlayersTurn};
pub use invariants::{HexInvariants, Invariant, InvariantSet, InvariantViolation};
pub use state::GameState;
pub use types::{CellId, Player};
pub use union_find::UnionFind;
