//! Shared game-loop helpers for the play and match commands

use hexversi_core::{Cell, GameResult, HexBoard, Result, Strategy, StrategyKind};

/// Outcome of one finished or abandoned game
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub game_number: usize,
    pub result: GameResult,
    pub moves: usize,
    pub black_score: u32,
    pub white_score: u32,
    /// Both sides passed in a row before the board filled up
    pub blocked: bool,
}

/// Pass the current player's turn if it has no legal move.
///
/// The skip is anchored on the first empty cell; with no legal move
/// anywhere that cell has no flank either.
pub fn pass_turn(board: &mut HexBoard) -> Result<bool> {
    if board.has_legal_move()? {
        return Ok(false);
    }

    let empty = board
        .cells()?
        .find(|&(_, cell)| cell == Cell::Empty)
        .map(|(coord, _)| coord);

    match empty {
        Some(coord) => board.skip_turn(coord),
        None => Ok(false),
    }
}

/// Game loop ends when the board says so or neither side can move
pub fn is_finished(board: &HexBoard, consecutive_passes: usize) -> Result<bool> {
    Ok(board.is_game_over()? || consecutive_passes >= 2)
}

/// Play one computer-vs-computer game to the end
pub fn play_ai_game(
    game_number: usize,
    radius: i32,
    black: StrategyKind,
    white: StrategyKind,
    seed: u64,
) -> Result<GameRecord> {
    let mut board = HexBoard::new(radius)?;
    let black_ai = black.build(Cell::Black, seed);
    let white_ai = white.build(Cell::White, seed.wrapping_add(7777));

    let mut moves = 0;
    let mut passes = 0;

    while !is_finished(&board, passes)? {
        let color = board.current_player()?.color();
        let ai: &dyn Strategy = if color == Cell::Black { &*black_ai } else { &*white_ai };

        match ai.determine_move(&board)? {
            Some(mv) => {
                board.commit_move_as(color, mv)?;
                moves += 1;
                passes = 0;
            }
            None => {
                pass_turn(&mut board)?;
                passes += 1;
            }
        }
    }

    Ok(GameRecord {
        game_number,
        result: board.who_won()?,
        moves,
        black_score: board.player(Cell::Black)?.map_or(0, |p| p.score()),
        white_score: board.player(Cell::White)?.map_or(0, |p| p.score()),
        blocked: !board.is_game_over()?,
    })
}
