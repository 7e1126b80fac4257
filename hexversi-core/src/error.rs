//! Engine error types

use crate::board::Coord;
use crate::cell::Cell;

/// Errors raised by board operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("game has not started yet")]
    NotStarted,

    #[error("coordinate {0} is not on the board")]
    InvalidCoordinate(Coord),

    #[error("{0} is not a legal move")]
    IllegalMove(Coord),

    #[error("not {}'s turn ({} to move)", .actual.name(), .expected.name())]
    IllegalTurn { expected: Cell, actual: Cell },

    #[error("invalid board radius: {0}")]
    InvalidRadius(i32),
}

pub type Result<T> = std::result::Result<T, BoardError>;
