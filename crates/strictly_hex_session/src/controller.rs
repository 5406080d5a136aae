//! Turn controller: sequences human input and the move selector.
//!
//! The controller is the single owner of a [`GameState`]. Human moves
//! arrive through [`TurnController::submit`]; selector moves are computed
//! on a spawned Tokio task and marshalled back through
//! [`TurnController::poll_selector`] or [`TurnController::await_selector`].
//! While a selection is in flight every human submission is rejected.

use crate::config::{ConfigError, GameConfig, Seat};
use crate::events::GameEvent;
use crate::selector::{MoveSelector, SelectorError};
use derive_more::Display;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Instant;
use strum::IntoEnumIterator;
use strictly_hex::{
    Board, BoardError, CellId, GameState, LegalMove, Move, MoveError, Player,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, trace, warn};

#[cfg(debug_assertions)]
use strictly_hex::{HexInvariants, InvariantSet};

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Phase {
    /// Created or restarted, `start` not called yet.
    #[display("not started")]
    NotStarted,
    /// Waiting for a human move from the given player.
    #[display("awaiting move from {}", _0)]
    AwaitingMove(Player),
    /// The selector is choosing (or failed to choose) for the given player.
    #[display("awaiting selector move for {}", _0)]
    AwaitingSelectorMove(Player),
    /// The given player won.
    #[display("game over, {} won", _0)]
    GameOver(Player),
}

impl Phase {
    /// Player whose turn it is, if the game is running.
    pub fn to_move(self) -> Option<Player> {
        match self {
            Phase::AwaitingMove(player) | Phase::AwaitingSelectorMove(player) => Some(player),
            Phase::NotStarted | Phase::GameOver(_) => None,
        }
    }
}

/// Why a submitted move was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    /// `start` has not been called.
    #[display("Game has not started")]
    NotStarted,
    /// The game is already decided.
    #[display("Game is over, {} won", winner)]
    GameOver {
        /// Winning player.
        winner: Player,
    },
    /// The selector is choosing; human input is locked out.
    #[display("Waiting for the move selector")]
    SelectorPending,
    /// The cell already has an owner.
    #[display("Cell {} is already owned by {}", cell, owner)]
    CellOccupied {
        /// Requested cell.
        cell: CellId,
        /// Current owner.
        owner: Player,
    },
    /// The mover is not the player to move.
    #[display("It is {}'s turn, not {}'s", to_move, player)]
    NotYourTurn {
        /// Player who tried to move.
        player: Player,
        /// Player whose turn it is.
        to_move: Player,
    },
}

/// Result of a submission that passed range checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was applied.
    Applied {
        /// Claimed cell.
        cell: CellId,
        /// New owner.
        player: Player,
        /// Phase after the move.
        phase: Phase,
    },
    /// The move was refused; nothing changed.
    Rejected(Rejection),
}

impl MoveOutcome {
    /// Returns true if the move was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }
}

/// Controller failures.
///
/// Selector variants are integration faults: they are never retried and
/// leave the controller waiting on a selector until `restart`.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ControllerError {
    /// Invalid configuration.
    #[display("{}", _0)]
    Config(ConfigError),
    /// Board-level failure such as an out-of-range cell id.
    #[display("{}", _0)]
    Board(BoardError),
    /// The selector returned a cell it was not allowed to pick.
    #[display("Selector returned illegal cell {}: {}", cell, reason)]
    SelectorContract {
        /// Returned cell.
        cell: CellId,
        /// What was wrong with it.
        reason: String,
    },
    /// The selector reported an error.
    #[display("{}", _0)]
    SelectorFailed(SelectorError),
    /// The selector task ended without answering.
    #[display("Selector task ended without a result")]
    SelectorVanished,
    /// Human vs selector mode needs a selector.
    #[display("No move selector configured for human vs selector mode")]
    MissingSelector,
    /// Selector dispatch needs a Tokio runtime.
    #[display("No Tokio runtime available to run the move selector")]
    NoRuntime,
    /// Operation not allowed in the current phase.
    #[display("Operation not allowed while {}", _0)]
    InvalidPhase(Phase),
    /// `await_selector` called with nothing in flight.
    #[display("No selector computation in flight")]
    NoSelectionPending,
    /// Game state invariants broken after a move.
    #[display("{} invariant(s) violated", _0.len())]
    Invariants(Vec<strictly_hex::InvariantViolation>),
}

impl std::error::Error for ControllerError {}

impl From<BoardError> for ControllerError {
    fn from(err: BoardError) -> Self {
        ControllerError::Board(err)
    }
}

impl From<ConfigError> for ControllerError {
    fn from(err: ConfigError) -> Self {
        ControllerError::Config(err)
    }
}

impl From<SelectorError> for ControllerError {
    fn from(err: SelectorError) -> Self {
        ControllerError::SelectorFailed(err)
    }
}

type Selection = Result<CellId, SelectorError>;

/// A selector computation in flight.
struct PendingSelection {
    player: Player,
    started: Instant,
    task: JoinHandle<()>,
    rx: oneshot::Receiver<Selection>,
}

/// Sequences one Hex session.
pub struct TurnController {
    config: GameConfig,
    selector: Option<Arc<dyn MoveSelector>>,
    events: mpsc::UnboundedSender<GameEvent>,
    rng: StdRng,
    state: GameState,
    phase: Phase,
    first_player: Player,
    pending: Option<PendingSelection>,
    game_over_sent: bool,
}

impl std::fmt::Debug for TurnController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("config", &self.config)
            .field("selector", &self.selector.as_ref().map(|s| s.name().to_string()))
            .field("phase", &self.phase)
            .field("first_player", &self.first_player)
            .field("moves", &self.state.history().len())
            .field("selector_pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

impl TurnController {
    /// Creates a controller in `NotStarted`.
    ///
    /// The first player is resolved from the policy, treating the
    /// previous game's first player as A.
    #[instrument(skip(selector, events), fields(has_selector = selector.is_some()))]
    pub fn new(
        config: GameConfig,
        selector: Option<Arc<dyn MoveSelector>>,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        let needs_selector = Player::iter().any(|player| config.seat(player) == Seat::Selector);
        if needs_selector && selector.is_none() {
            return Err(ControllerError::MissingSelector);
        }
        if needs_selector {
            require_runtime()?;
        }

        let mut rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        let first_player = config.first_player().next_first_player(Player::A, &mut rng);
        let state = GameState::new(*config.board_size())?;
        debug!(%first_player, "Controller created");

        Ok(Self {
            config,
            selector,
            events,
            rng,
            state,
            phase: Phase::NotStarted,
            first_player,
            pending: None,
            game_over_sent: false,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// First player of the current game.
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// Session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Full game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Applied moves in placement order.
    pub fn history(&self) -> &[Move] {
        self.state.history()
    }

    /// Winner, once the game is over.
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::GameOver(winner) => Some(winner),
            _ => None,
        }
    }

    /// Seat of `player`.
    pub fn seat(&self, player: Player) -> Seat {
        self.config.seat(player)
    }

    /// Returns true while a selector computation is in flight.
    pub fn selector_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Begins the game with the current first player.
    #[instrument(skip(self), fields(first_player = %self.first_player))]
    pub fn start(&mut self) -> Result<(), ControllerError> {
        if self.phase != Phase::NotStarted {
            warn!(phase = %self.phase, "Start called on a running controller");
            return Err(ControllerError::InvalidPhase(self.phase));
        }
        info!(
            size = self.state.board().size(),
            mode = %self.config.mode(),
            "Game started"
        );
        self.emit(GameEvent::Started {
            first_player: self.first_player,
        });
        self.enter_turn(self.first_player)
    }

    /// Submits a human move for the player to move.
    ///
    /// Out-of-range ids are errors; every other refusal is a
    /// [`MoveOutcome::Rejected`] value.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn submit(&mut self, cell: CellId) -> Result<MoveOutcome, ControllerError> {
        let player = self.phase.to_move().unwrap_or(self.first_player);
        self.submit_move(Move::new(player, cell))
    }

    /// Submits a human move on behalf of `mov.player`.
    #[instrument(skip(self), fields(phase = %self.phase, player = %mov.player, cell = %mov.cell))]
    pub fn submit_move(&mut self, mov: Move) -> Result<MoveOutcome, ControllerError> {
        self.state.board().check(mov.cell)?;

        let to_move = match self.phase {
            Phase::NotStarted => return Ok(self.reject(Rejection::NotStarted)),
            Phase::GameOver(winner) => return Ok(self.reject(Rejection::GameOver { winner })),
            Phase::AwaitingSelectorMove(_) => return Ok(self.reject(Rejection::SelectorPending)),
            Phase::AwaitingMove(player) => player,
        };

        match LegalMove::check(&mov, &self.state, to_move) {
            Ok(()) => self.apply(mov),
            Err(MoveError::CellOccupied { cell, owner }) => {
                Ok(self.reject(Rejection::CellOccupied { cell, owner }))
            }
            Err(MoveError::WrongPlayer { player, to_move }) => {
                Ok(self.reject(Rejection::NotYourTurn { player, to_move }))
            }
            Err(MoveError::OutOfRange(err)) => Err(err.into()),
        }
    }

    /// Applies the selector's answer if it has arrived. Never blocks.
    pub fn poll_selector(&mut self) -> Result<Option<MoveOutcome>, ControllerError> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(None);
        };
        match pending.rx.try_recv() {
            Ok(selection) => self.finish_selection(Some(selection)).map(Some),
            Err(oneshot::error::TryRecvError::Empty) => Ok(None),
            Err(oneshot::error::TryRecvError::Closed) => self.finish_selection(None).map(Some),
        }
    }

    /// Waits for the selector's answer and applies it.
    ///
    /// Cancel safe: dropping the future before completion loses nothing,
    /// the answer stays pending.
    pub async fn await_selector(&mut self) -> Result<MoveOutcome, ControllerError> {
        let pending = self
            .pending
            .as_mut()
            .ok_or(ControllerError::NoSelectionPending)?;
        let selection = (&mut pending.rx).await.ok();
        self.finish_selection(selection)
    }

    /// Clears the board and starts a new game. Allowed in any phase.
    ///
    /// An in-flight selector task is aborted and its answer discarded.
    #[instrument(skip(self), fields(phase = %self.phase, moves = self.state.history().len()))]
    pub fn restart(&mut self) -> Result<(), ControllerError> {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
            debug!(player = %pending.player, "Aborted in-flight selector");
        }

        let cleared = self.state.reset();
        self.emit(GameEvent::Reset {
            cleared: cleared.iter().map(|mov| mov.cell).collect(),
        });

        let previous = self.first_player;
        self.first_player = self
            .config
            .first_player()
            .next_first_player(previous, &mut self.rng);
        self.phase = Phase::NotStarted;
        self.game_over_sent = false;
        info!(cleared = cleared.len(), first_player = %self.first_player, "Game restarted");

        self.start()
    }

    fn reject(&self, rejection: Rejection) -> MoveOutcome {
        warn!(%rejection, "Move rejected");
        MoveOutcome::Rejected(rejection)
    }

    /// Every fallible step runs before the state changes, so an `Err`
    /// always means the move was not applied.
    fn apply(&mut self, mov: Move) -> Result<MoveOutcome, ControllerError> {
        if self.seat(mov.player.opponent()) == Seat::Selector {
            require_runtime()?;
        }

        #[cfg(debug_assertions)]
        {
            let mut next = self.state.clone();
            next.place(mov)?;
            check_invariants(&next)?;
        }

        self.state.place(mov)?;
        self.emit(GameEvent::CellClaimed {
            cell: mov.cell,
            player: mov.player,
        });

        if self.state.is_winner(mov.player) {
            self.phase = Phase::GameOver(mov.player);
            if !self.game_over_sent {
                self.game_over_sent = true;
                info!(winner = %mov.player, moves = self.state.history().len(), "Game over");
                self.emit(GameEvent::GameOver { winner: mov.player });
            }
        } else {
            debug!(%mov, "Move applied");
            self.enter_turn(mov.player.opponent())?;
        }

        Ok(MoveOutcome::Applied {
            cell: mov.cell,
            player: mov.player,
            phase: self.phase,
        })
    }

    fn enter_turn(&mut self, player: Player) -> Result<(), ControllerError> {
        let seat = self.seat(player);
        self.emit(GameEvent::TurnChanged { player, seat });
        match seat {
            Seat::Human => {
                self.phase = Phase::AwaitingMove(player);
                Ok(())
            }
            Seat::Selector => {
                self.phase = Phase::AwaitingSelectorMove(player);
                self.dispatch_selector(player)
            }
        }
    }

    fn dispatch_selector(&mut self, player: Player) -> Result<(), ControllerError> {
        let selector = self
            .selector
            .clone()
            .ok_or(ControllerError::MissingSelector)?;
        let runtime = require_runtime()?;

        let board = self.state.board().clone();
        let (tx, rx) = oneshot::channel();
        debug!(selector = selector.name(), %player, "Dispatching selector");
        let task = runtime.spawn(async move {
            let selection = selector.select(&board, player).await;
            if tx.send(selection).is_err() {
                trace!("Selector answer discarded");
            }
        });

        self.pending = Some(PendingSelection {
            player,
            started: Instant::now(),
            task,
            rx,
        });
        self.emit(GameEvent::SelectorStarted { player });
        Ok(())
    }

    /// Consumes the pending selection; `None` means the task vanished.
    fn finish_selection(
        &mut self,
        selection: Option<Selection>,
    ) -> Result<MoveOutcome, ControllerError> {
        let pending = self
            .pending
            .take()
            .ok_or(ControllerError::NoSelectionPending)?;
        let elapsed = pending.started.elapsed();
        let player = pending.player;
        info!(
            %player,
            ?elapsed,
            "Selector finished"
        );
        self.emit(GameEvent::SelectorCompleted {
            player,
            cell: selection.as_ref().and_then(|s| s.as_ref().ok().copied()),
            elapsed,
        });

        let cell = match selection {
            Some(Ok(cell)) => cell,
            Some(Err(err)) => {
                error!(%player, error = %err, "Move selector failed");
                return Err(err.into());
            }
            None => {
                error!(%player, "Move selector task ended without a result");
                return Err(ControllerError::SelectorVanished);
            }
        };

        let reason = match self.state.board().owner(cell) {
            Ok(None) => None,
            Ok(Some(owner)) => Some(format!("cell is owned by {}", owner)),
            Err(err) => Some(err.to_string()),
        };
        if let Some(reason) = reason {
            error!(%player, %cell, %reason, "Move selector broke its contract");
            return Err(ControllerError::SelectorContract { cell, reason });
        }

        self.apply(Move::new(player, cell))
    }

    fn emit(&self, event: GameEvent) {
        if self.events.send(event).is_err() {
            trace!("Event receiver dropped");
        }
    }
}

fn require_runtime() -> Result<tokio::runtime::Handle, ControllerError> {
    tokio::runtime::Handle::try_current().map_err(|_| ControllerError::NoRuntime)
}

#[cfg(debug_assertions)]
fn check_invariants(state: &GameState) -> Result<(), ControllerError> {
    HexInvariants::check_all(state).map_err(|violations| {
        for violation in &violations {
            error!(%violation, "Invariant violated");
        }
        ControllerError::Invariants(violations)
    })
}
