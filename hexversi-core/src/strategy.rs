//! Move-selection strategies for computer players
//!
//! Strategies only read the board. Flip counts come from the dry-run
//! [`HexBoard::calculate_flips_if_moved`], so evaluating candidates never
//! leaves the board in an intermediate state.

use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Coord;
use crate::cell::Cell;
use crate::error::{BoardError, Result};
use crate::game::HexBoard;

// ============================================================================
// STRATEGY TRAIT
// ============================================================================

/// Picks a move for one color. `None` means pass.
pub trait Strategy {
    /// Color this strategy plays
    fn color(&self) -> Cell;

    fn determine_move(&self, board: &HexBoard) -> Result<Option<Coord>>;
}

/// Fail unless it is `color`'s turn
fn ensure_turn(board: &HexBoard, color: Cell) -> Result<()> {
    let expected = board.current_player()?.color();
    if expected == color {
        Ok(())
    } else {
        Err(BoardError::IllegalTurn { expected, actual: color })
    }
}

// ============================================================================
// GREEDY FLIP
// ============================================================================

/// Plays the move that flips the most pieces; earliest move wins ties
#[derive(Clone, Debug)]
pub struct GreedyFlip {
    color: Cell,
}

impl GreedyFlip {
    pub fn new(color: Cell) -> Self {
        Self { color }
    }
}

impl Strategy for GreedyFlip {
    fn color(&self) -> Cell {
        self.color
    }

    fn determine_move(&self, board: &HexBoard) -> Result<Option<Coord>> {
        ensure_turn(board, self.color)?;

        let mut best = None;
        let mut max_flips = 0;
        for mv in board.legal_moves()? {
            let flips = board.calculate_flips_if_moved(mv)?;
            if flips > max_flips {
                max_flips = flips;
                best = Some(mv);
            }
        }

        debug!("greedy {} -> {:?} ({} flips)", self.color.name(), best, max_flips);
        Ok(best)
    }
}

// ============================================================================
// POSITIONAL
// ============================================================================

/// Prefers corners, then the uppermost non-corner move, then the move with
/// the most flanking directions
#[derive(Clone, Debug)]
pub struct Positional {
    color: Cell,
}

impl Positional {
    pub fn new(color: Cell) -> Self {
        Self { color }
    }
}

impl Strategy for Positional {
    fn color(&self) -> Cell {
        self.color
    }

    fn determine_move(&self, board: &HexBoard) -> Result<Option<Coord>> {
        ensure_turn(board, self.color)?;
        let radius = board.radius()?;

        let mut corners = Vec::new();
        let mut others = Vec::new();
        let mut fallback = None;
        let mut max_directions = 0;

        for mv in board.legal_moves()? {
            if mv.is_corner(radius) {
                corners.push(mv);
            } else {
                others.push(mv);
            }

            let directions = board.valid_move_list(mv)?.len();
            if directions > max_directions {
                max_directions = directions;
                fallback = Some(mv);
            }
        }

        // Coord orders by (y, p, n): the minimum is the uppermost-leftmost
        let choice = corners
            .into_iter()
            .min()
            .or_else(|| others.into_iter().min())
            .or(fallback);

        debug!("positional {} -> {:?}", self.color.name(), choice);
        Ok(choice)
    }
}

// ============================================================================
// RANDOM
// ============================================================================

/// Uniformly random legal move from a seeded generator
#[derive(Debug)]
pub struct RandomMove {
    color: Cell,
    rng: RefCell<ChaCha8Rng>,
}

impl RandomMove {
    pub fn with_seed(color: Cell, seed: u64) -> Self {
        Self {
            color,
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl Strategy for RandomMove {
    fn color(&self) -> Cell {
        self.color
    }

    fn determine_move(&self, board: &HexBoard) -> Result<Option<Coord>> {
        ensure_turn(board, self.color)?;
        let moves = board.legal_moves()?;
        let choice = moves.choose(&mut *self.rng.borrow_mut()).copied();
        debug!("random {} -> {:?}", self.color.name(), choice);
        Ok(choice)
    }
}

// ============================================================================
// STRATEGY SELECTION
// ============================================================================

/// Named strategy, as used in configuration and on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Greedy,
    Positional,
    Random,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Greedy,
        StrategyKind::Positional,
        StrategyKind::Random,
    ];

    /// Build a strategy playing `color`. `seed` only affects `Random`.
    pub fn build(self, color: Cell, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Greedy => Box::new(GreedyFlip::new(color)),
            StrategyKind::Positional => Box::new(Positional::new(color)),
            StrategyKind::Random => Box::new(RandomMove::with_seed(color, seed)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Greedy => "greedy",
            StrategyKind::Positional => "positional",
            StrategyKind::Random => "random",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown strategy: {} (expected greedy, positional or random)", s))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::all_in_range;

    /// Black to move with exactly two options:
    /// (1,-3,2) flips three, corner (-3,3,0) flips one.
    fn corner_vs_greedy() -> HexBoard {
        let mut board = HexBoard::new(3).unwrap();
        for c in all_in_range(3) {
            board.set_cell(c, Cell::Empty).unwrap();
        }
        for c in [Coord::new(1, -2, 1), Coord::new(1, -1, 0), Coord::new(1, 0, -1)] {
            board.set_cell(c, Cell::White).unwrap();
        }
        board.set_cell(Coord::new(1, 1, -2), Cell::Black).unwrap();
        board.set_cell(Coord::new(-2, 3, -1), Cell::White).unwrap();
        board.set_cell(Coord::new(-1, 3, -2), Cell::Black).unwrap();
        board
    }

    #[test]
    fn test_scenario_moves() {
        let board = corner_vs_greedy();
        assert_eq!(
            board.legal_moves().unwrap(),
            vec![Coord::new(-3, 3, 0), Coord::new(1, -3, 2)]
        );
        assert_eq!(board.calculate_flips_if_moved(Coord::new(-3, 3, 0)).unwrap(), 1);
        assert_eq!(board.calculate_flips_if_moved(Coord::new(1, -3, 2)).unwrap(), 3);
    }

    #[test]
    fn test_greedy_picks_most_flips() {
        let board = corner_vs_greedy();
        let greedy = GreedyFlip::new(Cell::Black);
        assert_eq!(greedy.determine_move(&board).unwrap(), Some(Coord::new(1, -3, 2)));
    }

    #[test]
    fn test_greedy_tie_keeps_first() {
        let board = HexBoard::new(3).unwrap();
        let greedy = GreedyFlip::new(Cell::Black);
        assert_eq!(greedy.determine_move(&board).unwrap(), Some(Coord::new(-2, 1, 1)));
    }

    #[test]
    fn test_positional_prefers_corner() {
        let board = corner_vs_greedy();
        let positional = Positional::new(Cell::Black);
        assert_eq!(positional.determine_move(&board).unwrap(), Some(Coord::new(-3, 3, 0)));
    }

    #[test]
    fn test_positional_opening_move() {
        let board = HexBoard::new(3).unwrap();
        let positional = Positional::new(Cell::Black);
        assert_eq!(positional.determine_move(&board).unwrap(), Some(Coord::new(-2, 1, 1)));
    }

    #[test]
    fn test_positional_takes_lowest_non_corner() {
        // On radius 2 every opening move borders a corner
        let board = HexBoard::new(2).unwrap();
        let moves = board.legal_moves().unwrap();
        assert!(moves.iter().all(|m| !m.is_corner(2)));

        let positional = Positional::new(Cell::Black);
        assert_eq!(positional.determine_move(&board).unwrap(), Some(moves[0]));
    }

    #[test]
    fn test_positional_rim_move_beside_corner() {
        // (-3,1,2) borders corner (-3,0,3); (1,-1,0) is interior
        let mut board = HexBoard::new(3).unwrap();
        for c in all_in_range(3) {
            board.set_cell(c, Cell::Empty).unwrap();
        }
        board.set_cell(Coord::new(-2, 1, 1), Cell::White).unwrap();
        board.set_cell(Coord::new(-1, 1, 0), Cell::Black).unwrap();
        board.set_cell(Coord::new(0, -1, 1), Cell::White).unwrap();
        board.set_cell(Coord::new(-1, -1, 2), Cell::Black).unwrap();
        assert_eq!(
            board.legal_moves().unwrap(),
            vec![Coord::new(-3, 1, 2), Coord::new(1, -1, 0)]
        );

        let positional = Positional::new(Cell::Black);
        assert_eq!(positional.determine_move(&board).unwrap(), Some(Coord::new(-3, 1, 2)));
    }

    #[test]
    fn test_no_moves_means_pass() {
        let board = HexBoard::new(1).unwrap();
        assert_eq!(GreedyFlip::new(Cell::Black).determine_move(&board).unwrap(), None);
        assert_eq!(Positional::new(Cell::Black).determine_move(&board).unwrap(), None);
        assert_eq!(
            RandomMove::with_seed(Cell::Black, 7).determine_move(&board).unwrap(),
            None
        );
    }

    #[test]
    fn test_wrong_turn() {
        let board = HexBoard::new(3).unwrap();
        let err = GreedyFlip::new(Cell::White).determine_move(&board).unwrap_err();
        assert_eq!(err, BoardError::IllegalTurn { expected: Cell::Black, actual: Cell::White });
    }

    #[test]
    fn test_strategies_do_not_mutate() {
        let board = corner_vs_greedy();
        let before: Vec<_> = board.cells().unwrap().collect();
        for kind in StrategyKind::ALL {
            kind.build(Cell::Black, 1).determine_move(&board).unwrap();
        }
        assert_eq!(board.cells().unwrap().collect::<Vec<_>>(), before);
        assert_eq!(board.current_player().unwrap().color(), Cell::Black);
    }

    #[test]
    fn test_random_is_seeded() {
        let board = HexBoard::new(4).unwrap();
        let a = RandomMove::with_seed(Cell::Black, 42);
        let b = RandomMove::with_seed(Cell::Black, 42);
        for _ in 0..5 {
            let mv = a.determine_move(&board).unwrap();
            assert_eq!(mv, b.determine_move(&board).unwrap());
            assert!(board.is_valid_move(mv.unwrap()).unwrap());
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("greedy".parse::<StrategyKind>(), Ok(StrategyKind::Greedy));
        assert_eq!("Positional".parse::<StrategyKind>(), Ok(StrategyKind::Positional));
        assert!("minimax".parse::<StrategyKind>().is_err());
        assert_eq!(StrategyKind::Random.to_string(), "random");
    }
}
