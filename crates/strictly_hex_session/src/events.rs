//! Events sent from the controller to the presentation layer.

use crate::config::Seat;
use std::time::Duration;
use strictly_hex::{CellId, Player};

/// Messages sent from the controller to the UI.
///
/// Sending never fails the controller; a dropped receiver only means
/// nobody is watching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A new game began.
    Started {
        /// Player who opens.
        first_player: Player,
    },
    /// It is now `player`'s turn.
    TurnChanged {
        /// Player to move.
        player: Player,
        /// Where the move will come from.
        seat: Seat,
    },
    /// The move selector began computing.
    SelectorStarted {
        /// Player the selector moves for.
        player: Player,
    },
    /// The move selector finished (successfully or not).
    SelectorCompleted {
        /// Player the selector moved for.
        player: Player,
        /// Chosen cell, or `None` if the selector failed.
        cell: Option<CellId>,
        /// Wall time spent computing.
        elapsed: Duration,
    },
    /// A cell was claimed.
    CellClaimed {
        /// Claimed cell.
        cell: CellId,
        /// New owner.
        player: Player,
    },
    /// The game ended.
    GameOver {
        /// Winning player.
        winner: Player,
    },
    /// The board was cleared.
    Reset {
        /// Cells that were owned, in placement order.
        cleared: Vec<CellId>,
    },
}
