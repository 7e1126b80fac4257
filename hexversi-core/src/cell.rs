//! Cell contents and player records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Contents of one board cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Black,
    White,
    Empty,
}

impl Cell {
    /// Symbol used by the text view
    pub fn symbol(self) -> char {
        match self {
            Cell::Black => 'X',
            Cell::White => 'O',
            Cell::Empty => '-',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cell::Black => "Black",
            Cell::White => "White",
            Cell::Empty => "Empty",
        }
    }

    /// The other piece color. Empty stays Empty.
    pub fn opponent(self) -> Self {
        match self {
            Cell::Black => Cell::White,
            Cell::White => Cell::Black,
            Cell::Empty => Cell::Empty,
        }
    }

    pub fn is_piece(self) -> bool {
        self != Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One side of the game: a fixed color and a running score
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    color: Cell,
    score: u32,
}

impl Player {
    pub(crate) fn new(color: Cell) -> Self {
        debug_assert!(color.is_piece(), "players must own a piece color");
        Self { color, score: 0 }
    }

    pub fn color(&self) -> Cell {
        self.color
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub(crate) fn reset_score(&mut self) {
        self.score = 0;
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color.name())
    }
}
