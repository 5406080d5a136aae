//! Rule-level properties exercised over many random games.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use strictly_hex::{
    Board, BoardError, CellId, GameState, HexInvariants, InvariantSet, Move, Player,
};

/// Plays shuffled cells alternately until the board is full.
fn random_full_game(size: usize, seed: u64) -> Vec<GameState> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cells: Vec<usize> = (1..=size * size).collect();
    cells.shuffle(&mut rng);

    let mut state = GameState::new(size).unwrap();
    let mut snapshots = Vec::new();
    let mut player = if seed % 2 == 0 { Player::A } else { Player::B };
    for id in cells {
        state.place(Move::new(player, CellId::new(id))).unwrap();
        snapshots.push(state.clone());
        player = player.opponent();
    }
    snapshots
}

#[test]
fn test_never_two_winners() {
    for seed in 0..200 {
        let size = 2 + (seed as usize % 7);
        for state in random_full_game(size, seed) {
            assert!(
                !(state.is_winner(Player::A) && state.is_winner(Player::B)),
                "seed {seed} size {size}:\n{}",
                state.board()
            );
        }
    }
}

#[test]
fn test_full_board_has_exactly_one_winner() {
    for seed in 0..200 {
        let size = 2 + (seed as usize % 9);
        let states = random_full_game(size, seed);
        let last = states.last().unwrap();
        assert!(
            last.winner().is_some(),
            "seed {seed} size {size}: full board without a winner\n{}",
            last.board()
        );
    }
}

#[test]
fn test_winner_is_sticky() {
    for seed in 0..50 {
        let states = random_full_game(6, seed);
        let first_win = states.iter().position(|s| s.winner().is_some()).unwrap();
        let winner = states[first_win].winner();
        assert!(states[first_win..].iter().all(|s| s.winner() == winner));
    }
}

#[test]
fn test_invariants_hold_throughout_random_games() {
    for seed in 0..30 {
        for state in random_full_game(5, seed) {
            assert!(HexInvariants::check_all(&state).is_ok(), "seed {seed}");
        }
    }
}

#[test]
fn test_second_claim_is_rejected_without_side_effects() {
    let mut state = GameState::new(4).unwrap();
    state.place(Move::new(Player::A, CellId::new(6))).unwrap();
    let before = state.clone();

    let err = state.place(Move::new(Player::B, CellId::new(6))).unwrap_err();
    assert_eq!(
        err,
        BoardError::Occupied {
            cell: CellId::new(6),
            owner: Player::A
        }
    );
    assert_eq!(state, before);
}

#[test]
fn test_long_winding_chain_wins() {
    // Down column 0, then along the bottom row into column 3.
    let mut state = GameState::new(4).unwrap();
    for id in [1, 5, 9, 13, 14, 15] {
        state.place(Move::new(Player::A, CellId::new(id))).unwrap();
        assert!(!state.is_winner(Player::A), "premature win at {id}");
    }
    state.place(Move::new(Player::A, CellId::new(16))).unwrap();
    assert!(state.is_winner(Player::A));
    assert!(!state.is_winner(Player::B));
}

#[test]
fn test_board_display_round_trips_ownership() {
    let mut board = Board::new(3).unwrap();
    board.set_owner(CellId::new(5), Player::B).unwrap();
    let rendered = board.display();
    assert_eq!(rendered.lines().count(), 3);
    assert_eq!(rendered.lines().nth(1), Some(" . B ."));
}
