//! Game configuration: board size and who sits in each seat

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::Result;
use crate::game::HexBoard;
use crate::strategy::{Strategy, StrategyKind};

/// Default board radius
pub const DEFAULT_RADIUS: i32 = 3;

/// Who controls a seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Human,
    Ai(StrategyKind),
}

impl Seat {
    pub fn is_human(self) -> bool {
        self == Seat::Human
    }

    /// Strategy for an AI seat, `None` for a human
    pub fn strategy(self, color: Cell, seed: u64) -> Option<Box<dyn Strategy>> {
        match self {
            Seat::Human => None,
            Seat::Ai(kind) => Some(kind.build(color, seed)),
        }
    }
}

/// Settings for one game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub radius: i32,
    pub black: Seat,
    pub white: Seat,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            black: Seat::Human,
            white: Seat::Ai(StrategyKind::Positional),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Seat controlling a color
    pub fn seat(&self, color: Cell) -> Seat {
        match color {
            Cell::White => self.white,
            _ => self.black,
        }
    }

    /// Build a started board for this configuration
    pub fn new_board(&self) -> Result<HexBoard> {
        HexBoard::new(self.radius)
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        if config.radius < 0 {
            anyhow::bail!("radius must be non-negative, got {}", config.radius);
        }
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
