//! Integration tests for the HEXVERSI engine
//!
//! Plays seeded random games and checks the board invariants after every move.

use hexversi_core::{
    all_in_range, BoardError, Cell, Coord, GameResult, HexBoard, Strategy, StrategyKind,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn key_set(board: &HexBoard) -> BTreeSet<Coord> {
    board.cells().unwrap().map(|(c, _)| c).collect()
}

/// Pass the turn from the first empty cell, mirroring a driver with no move
fn pass(board: &mut HexBoard) -> bool {
    let empty = board.cells().unwrap().find(|&(_, cell)| cell == Cell::Empty).map(|(c, _)| c);
    match empty {
        Some(c) => board.skip_turn(c).unwrap(),
        None => false,
    }
}

/// Play random legal moves until the game ends, checking invariants each move
fn random_playout(radius: i32, seed: u64) -> HexBoard {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut board = HexBoard::new(radius).unwrap();
    let expected_keys: BTreeSet<Coord> = all_in_range(radius).into_iter().collect();
    let mut passes = 0;
    let mut total_flips = 0u32;

    while !board.is_game_over().unwrap() && passes < 2 {
        let moves = board.legal_moves().unwrap();
        let Some(&mv) = moves.choose(&mut rng) else {
            assert!(pass(&mut board));
            passes += 1;
            continue;
        };
        passes = 0;

        let mover = board.current_player().unwrap().color();
        let mover_score = board.current_player_score().unwrap();
        let predicted = board.calculate_flips_if_moved(mv).unwrap();

        board.commit_move(mv).unwrap();

        assert_eq!(board.flipped().unwrap().len(), predicted);
        assert!(predicted >= 1);
        assert_eq!(board.get_cell_at(mv).unwrap(), Some(mover));
        for &c in board.flipped().unwrap() {
            assert_eq!(board.get_cell_at(c).unwrap(), Some(mover));
        }
        assert_ne!(board.current_player().unwrap().color(), mover);
        assert_eq!(
            board.player(mover).unwrap().unwrap().score(),
            mover_score + predicted as u32
        );
        assert_eq!(key_set(&board), expected_keys);
        total_flips += predicted as u32;
    }

    let black = board.player(Cell::Black).unwrap().unwrap().score();
    let white = board.player(Cell::White).unwrap().unwrap().score();
    assert_eq!(black + white, total_flips);
    board
}

// ============================================================================
// RANDOM PLAYOUTS
// ============================================================================

#[test]
fn test_random_playouts_keep_invariants() {
    for seed in 0..20 {
        for radius in 2..=4 {
            random_playout(radius, seed);
        }
    }
}

#[test]
fn test_playouts_report_a_result() {
    let board = random_playout(3, 11);
    let result = board.who_won().unwrap();
    let black = board.player(Cell::Black).unwrap().unwrap().score();
    let white = board.player(Cell::White).unwrap().unwrap().score();
    match result {
        GameResult::Winner(Cell::Black) => assert!(black > white),
        GameResult::Winner(Cell::White) => assert!(white > black),
        GameResult::Tie => assert_eq!(black, white),
        GameResult::Winner(Cell::Empty) => panic!("empty cannot win"),
    }
}

#[test]
fn test_recount_matches_board() {
    let board = random_playout(4, 3);
    let pieces = board.add_up_score(Cell::Black).unwrap() + board.add_up_score(Cell::White).unwrap();
    let empty = board.count(Cell::Empty).unwrap() as u32;
    assert_eq!(pieces + empty, board.number_of_cells().unwrap() as u32);
}

// ============================================================================
// STRATEGY GAMES
// ============================================================================

#[test]
fn test_strategy_vs_strategy() {
    for black_kind in StrategyKind::ALL {
        for white_kind in StrategyKind::ALL {
            let mut board = HexBoard::new(3).unwrap();
            let black = black_kind.build(Cell::Black, 5);
            let white = white_kind.build(Cell::White, 6);
            let mut passes = 0;
            let mut moves = 0;

            while !board.is_game_over().unwrap() && passes < 2 {
                let color = board.current_player().unwrap().color();
                let strategy: &dyn Strategy = if color == Cell::Black { &*black } else { &*white };
                match strategy.determine_move(&board).unwrap() {
                    Some(mv) => {
                        board.commit_move_as(color, mv).unwrap();
                        passes = 0;
                        moves += 1;
                    }
                    None => {
                        assert!(!board.has_legal_move().unwrap());
                        pass(&mut board);
                        passes += 1;
                    }
                }
            }

            assert!(moves > 0, "{} vs {}", black_kind, white_kind);
            assert!(moves <= 37);
        }
    }
}

// ============================================================================
// ERROR PATHS
// ============================================================================

#[test]
fn test_preconditions_before_start() {
    let board = HexBoard::unstarted(3).unwrap();
    assert_eq!(board.legal_moves(), Err(BoardError::NotStarted));
    assert_eq!(board.who_won(), Err(BoardError::NotStarted));
    assert_eq!(board.radius(), Err(BoardError::NotStarted));
    assert_eq!(board.count(Cell::Black), Err(BoardError::NotStarted));
    assert!(matches!(board.flipped(), Err(BoardError::NotStarted)));
    assert!(matches!(board.player(Cell::Black), Err(BoardError::NotStarted)));
    assert!(matches!(board.cells(), Err(BoardError::NotStarted)));
    assert!(!board.is_started());
}

#[test]
fn test_accessors_after_start() {
    let mut board = HexBoard::unstarted(3).unwrap();
    board.start_game();
    assert_eq!(board.cells().unwrap().count(), 37);
    assert_eq!(board.count(Cell::White).unwrap(), 3);
    assert!(board.flipped().unwrap().is_empty());
    assert_eq!(board.player(Cell::White).unwrap().unwrap().score(), 0);
    assert!(board.player(Cell::Empty).unwrap().is_none());
}

#[test]
fn test_off_board_queries() {
    let mut board = HexBoard::new(2).unwrap();
    let off = Coord::new(0, 3, -3);
    assert_eq!(board.is_valid_coordinate(off), Ok(false));
    assert_eq!(board.calculate_flips_if_moved(off), Err(BoardError::InvalidCoordinate(off)));
    assert_eq!(board.set_cell(off, Cell::Black), Err(BoardError::InvalidCoordinate(off)));
    assert_eq!(board.commit_move(off), Err(BoardError::InvalidCoordinate(off)));
}
