//! Line-oriented terminal play.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use strictly_hex::{CellId, Player};
use strictly_hex_session::{
    GameConfig, GameEvent, GameMode, MoveOutcome, MoveSelector, RandomSelector, Seat, SessionHandle,
    TurnController, spawn_session,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

const HELP: &str = "Type a cell id to claim it, 'r' to restart, 'q' to quit.";

/// What the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Claim(CellId),
    Restart,
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "q" | "quit" | "exit" => Input::Quit,
        "r" | "restart" => Input::Restart,
        other => other
            .parse::<usize>()
            .map(|id| Input::Claim(CellId::new(id)))
            .unwrap_or(Input::Unknown),
    }
}

fn player_label(player: Player) -> String {
    format!("Player {} ({})", player, player.target_edges())
}

/// Runs an interactive session until the user quits or stdin closes.
#[instrument(skip(config), fields(size = config.board_size(), mode = %config.mode()))]
pub async fn play(config: GameConfig, think_time: Duration) -> Result<()> {
    let selector: Option<Arc<dyn MoveSelector>> = match config.mode() {
        GameMode::HumanVsHuman => None,
        GameMode::HumanVsSelector => {
            let robot = match config.seed() {
                Some(seed) => RandomSelector::seeded("robot", *seed),
                None => RandomSelector::new("robot"),
            };
            Some(Arc::new(robot.with_think_time(think_time)))
        }
    };

    let (tx, mut events) = mpsc::unbounded_channel();
    let controller = TurnController::new(config, selector, tx)?;
    let (handle, task) = spawn_session(controller);

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => render(&handle, event).await,
                None => break,
            },
            line = lines.next_line() => match line.context("Failed to read stdin")? {
                Some(line) => {
                    if !handle_input(&handle, parse_input(&line)).await {
                        break;
                    }
                }
                None => break,
            },
        }
    }

    handle.shutdown();
    let controller = task.await.context("Session task panicked")??;
    info!(moves = controller.history().len(), "Session finished");
    Ok(())
}

/// Returns false when the user asked to quit.
async fn handle_input(handle: &SessionHandle, input: Input) -> bool {
    debug!(?input, "User input");
    match input {
        Input::Quit => return false,
        Input::Restart => {
            if let Err(err) = handle.restart().await {
                println!("{err}");
            }
        }
        Input::Unknown => println!("{HELP}"),
        Input::Claim(cell) => match handle.submit(cell).await {
            Ok(MoveOutcome::Applied { .. }) => {}
            Ok(MoveOutcome::Rejected(reason)) => println!("{reason}"),
            Err(err) => {
                warn!(%cell, error = %err, "Move refused");
                println!("{err}");
            }
        },
    }
    true
}

async fn print_board(handle: &SessionHandle) {
    match handle.snapshot().await {
        Ok(snapshot) => println!("\n{}", snapshot.board()),
        Err(err) => debug!(error = %err, "No snapshot"),
    }
}

async fn render(handle: &SessionHandle, event: GameEvent) {
    match event {
        GameEvent::Started { first_player } => {
            println!("New game, {} opens.", player_label(first_player));
        }
        GameEvent::TurnChanged {
            player,
            seat: Seat::Human,
        } => {
            print_board(handle).await;
            println!("{} to move:", player_label(player));
        }
        GameEvent::TurnChanged {
            player,
            seat: Seat::Selector,
        } => println!("{} is thinking...", player_label(player)),
        GameEvent::SelectorCompleted {
            player,
            cell: Some(cell),
            elapsed,
        } => println!(
            "{} played {} ({} ms).",
            player_label(player),
            cell,
            elapsed.as_millis()
        ),
        GameEvent::GameOver { winner } => {
            print_board(handle).await;
            println!("{} wins! 'r' to play again, 'q' to quit.", player_label(winner));
        }
        GameEvent::Reset { cleared } => println!("Board cleared ({} stones).", cleared.len()),
        GameEvent::SelectorStarted { .. }
        | GameEvent::SelectorCompleted { cell: None, .. }
        | GameEvent::CellClaimed { .. } => {}
    }
}
