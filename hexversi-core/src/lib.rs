//! HEXVERSI Core - Hexagonal reversi engine and AI
//!
//! This crate provides the core game logic for HEXVERSI:
//! - Board geometry (hex grid with cube coordinates)
//! - Cell contents and player scores
//! - Board state, move legality and flipping
//! - Move-selection strategies for computer players
//! - Game configuration

pub mod board;
pub mod cell;
pub mod error;
pub mod game;
pub mod strategy;
pub mod config;

// Re-exports for convenient access
pub use board::{all_in_range, cell_count, is_in_range, Coord, ParseCoordError, DIRECTIONS};
pub use cell::{Cell, Player};
pub use error::{BoardError, Result};
pub use game::{BoardObserver, BoardSnapshot, GameResult, HexBoard};
pub use strategy::{GreedyFlip, Positional, RandomMove, Strategy, StrategyKind};
pub use config::{GameConfig, Seat, DEFAULT_RADIUS};
