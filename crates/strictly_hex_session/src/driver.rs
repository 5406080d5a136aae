//! Session driver: runs a [`TurnController`] on its own task.
//!
//! All mutation goes through one task. Input sources talk to it through a
//! cloneable [`SessionHandle`]; selector answers are applied as soon as
//! they arrive.

use crate::controller::{ControllerError, MoveOutcome, Phase, TurnController};
use derive_getters::Getters;
use derive_more::Display;
use strictly_hex::{Board, CellId, Move, Player};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Point-in-time copy of the session.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SessionSnapshot {
    /// Controller phase.
    phase: Phase,
    /// Board ownership.
    board: Board,
    /// Applied moves in placement order.
    history: Vec<Move>,
    /// First player of the current game.
    first_player: Player,
}

/// Errors seen by session handles.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum SessionError {
    /// The session task has ended.
    #[display("Session has ended")]
    Closed,
    /// The controller refused the request.
    #[display("{}", _0)]
    Controller(ControllerError),
}

impl std::error::Error for SessionError {}

impl From<ControllerError> for SessionError {
    fn from(err: ControllerError) -> Self {
        SessionError::Controller(err)
    }
}

enum Command {
    Submit {
        cell: CellId,
        reply: oneshot::Sender<Result<MoveOutcome, ControllerError>>,
    },
    Restart {
        reply: oneshot::Sender<Result<(), ControllerError>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Shutdown,
}

/// Cloneable handle to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    /// Submits a human move for the player to move.
    #[instrument(skip(self))]
    pub async fn submit(&self, cell: CellId) -> Result<MoveOutcome, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Submit { cell, reply })?;
        Ok(rx.await.map_err(|_| SessionError::Closed)??)
    }

    /// Clears the board and starts the next game.
    #[instrument(skip(self))]
    pub async fn restart(&self) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Restart { reply })?;
        Ok(rx.await.map_err(|_| SessionError::Closed)??)
    }

    /// Copies the current session state.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot { reply })?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Asks the session to stop. Returns immediately.
    pub fn shutdown(&self) {
        if self.commands.send(Command::Shutdown).is_err() {
            debug!("Session already ended");
        }
    }

    fn send(&self, command: Command) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .map_err(|_| SessionError::Closed)
    }
}

/// Spawns the session task. Must be called inside a Tokio runtime.
///
/// The task starts the game if needed and returns the controller when
/// shut down (or when every handle is dropped). A fatal selector error
/// ends the task with that error.
pub fn spawn_session(
    controller: TurnController,
) -> (SessionHandle, JoinHandle<Result<TurnController, ControllerError>>) {
    let (commands, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(controller, rx));
    (SessionHandle { commands }, task)
}

#[instrument(skip_all)]
async fn run(
    mut controller: TurnController,
    mut commands: mpsc::UnboundedReceiver<Command>,
) -> Result<TurnController, ControllerError> {
    if controller.phase() == Phase::NotStarted {
        controller.start()?;
    }
    info!(phase = %controller.phase(), "Session running");

    loop {
        tokio::select! {
            outcome = controller.await_selector(), if controller.selector_pending() => {
                let outcome = outcome?;
                debug!(?outcome, "Selector move applied");
            }
            command = commands.recv() => match command {
                Some(Command::Submit { cell, reply }) => {
                    if reply.send(controller.submit(cell)).is_err() {
                        warn!(%cell, "Submit caller went away");
                    }
                }
                Some(Command::Restart { reply }) => {
                    if reply.send(controller.restart()).is_err() {
                        warn!("Restart caller went away");
                    }
                }
                Some(Command::Snapshot { reply }) => {
                    let snapshot = SessionSnapshot {
                        phase: controller.phase(),
                        board: controller.board().clone(),
                        history: controller.history().to_vec(),
                        first_player: controller.first_player(),
                    };
                    if reply.send(snapshot).is_err() {
                        debug!("Snapshot caller went away");
                    }
                }
                Some(Command::Shutdown) | None => break,
            },
        }
    }

    info!(moves = controller.history().len(), "Session stopped");
    Ok(controller)
}
