//! Board state, move legality and flipping

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::board::{all_in_range, is_in_range, Coord, DIRECTIONS};
use crate::cell::{Cell, Player};
use crate::error::{BoardError, Result};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Seat order: seat one always plays Black and moves first
const SEAT_COLORS: [Cell; 2] = [Cell::Black, Cell::White];

/// Starting pieces around the centre. Walking the ring in angular order
/// the colors alternate.
const HOME_ROW: [(Coord, Cell); 6] = [
    (Coord::new(0, 1, -1), Cell::Black),
    (Coord::new(0, -1, 1), Cell::White),
    (Coord::new(1, -1, 0), Cell::Black),
    (Coord::new(-1, 1, 0), Cell::White),
    (Coord::new(-1, 0, 1), Cell::Black),
    (Coord::new(1, 0, -1), Cell::White),
];

// ============================================================================
// CORE TYPES
// ============================================================================

/// Outcome of comparing final scores
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Cell),
    Tie,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Winner(color) => f.write_str(color.name()),
            GameResult::Tie => f.write_str("It's a tie"),
        }
    }
}

/// Receives a callback after every committed move
pub trait BoardObserver {
    fn on_board_changed(&mut self, board: &HexBoard);
}

impl<F: FnMut(&HexBoard)> BoardObserver for F {
    fn on_board_changed(&mut self, board: &HexBoard) {
        self(board)
    }
}

/// Serializable view of a board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub radius: i32,
    pub current: Cell,
    pub black_score: u32,
    pub white_score: u32,
    pub game_over: bool,
    pub cells: Vec<(Coord, Cell)>,
}

// ============================================================================
// BOARD
// ============================================================================

/// Hexagonal reversi board
pub struct HexBoard {
    /// Every on-board coordinate -> contents
    cells: FxHashMap<Coord, Cell>,

    /// Keys of `cells` in ascending (y, p, n) order
    order: Vec<Coord>,

    radius: i32,

    /// Seat one (Black) and seat two (White)
    players: [Player; 2],

    /// Index into `players`
    current: usize,

    /// Coordinates flipped by the last committed move
    flipped: Vec<Coord>,

    observers: Vec<Box<dyn BoardObserver>>,

    started: bool,
}

impl fmt::Debug for HexBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HexBoard")
            .field("radius", &self.radius)
            .field("players", &self.players)
            .field("current", &self.current)
            .field("flipped", &self.flipped)
            .field("observers", &self.observers.len())
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl HexBoard {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a board with the starting layout and start the game
    pub fn new(radius: i32) -> Result<Self> {
        let mut board = Self::unstarted(radius)?;
        board.start_game();
        Ok(board)
    }

    /// Create a board with the starting layout without starting the game
    pub fn unstarted(radius: i32) -> Result<Self> {
        if radius < 0 {
            return Err(BoardError::InvalidRadius(radius));
        }

        let order = all_in_range(radius);
        let mut cells: FxHashMap<Coord, Cell> =
            order.iter().map(|&c| (c, Cell::Empty)).collect();

        if radius >= 1 {
            for &(coord, color) in &HOME_ROW {
                cells.insert(coord, color);
            }
        }

        Ok(Self {
            cells,
            order,
            radius,
            players: [Player::new(SEAT_COLORS[0]), Player::new(SEAT_COLORS[1])],
            current: 0,
            flipped: Vec::new(),
            observers: Vec::new(),
            started: false,
        })
    }

    /// Mark the game as started and reset both scores
    pub fn start_game(&mut self) {
        self.started = true;
        for player in &mut self.players {
            player.reset_score();
        }
    }

    // ========================================================================
    // OBSERVERS
    // ========================================================================

    /// Register an observer, called after each committed move
    pub fn add_observer<O: BoardObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    fn notify_observers(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        for observer in &mut observers {
            observer.on_board_changed(self);
        }
        self.observers = observers;
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn radius(&self) -> Result<i32> {
        self.ensure_started()?;
        Ok(self.radius)
    }

    pub fn number_of_cells(&self) -> Result<usize> {
        self.ensure_started()?;
        Ok(self.cells.len())
    }

    pub fn current_player(&self) -> Result<&Player> {
        self.ensure_started()?;
        Ok(&self.players[self.current])
    }

    pub fn opponent_player(&self) -> Result<&Player> {
        self.ensure_started()?;
        Ok(&self.players[1 - self.current])
    }

    /// Player record for a color. Empty has no player.
    pub fn player(&self, color: Cell) -> Result<Option<&Player>> {
        self.ensure_started()?;
        Ok(self.players.iter().find(|p| p.color() == color))
    }

    pub fn current_player_score(&self) -> Result<u32> {
        Ok(self.current_player()?.score())
    }

    pub fn opponent_player_score(&self) -> Result<u32> {
        Ok(self.opponent_player()?.score())
    }

    /// Contents of a coordinate; `None` when it is not on the board
    pub fn get_cell_at(&self, coord: Coord) -> Result<Option<Cell>> {
        self.ensure_started()?;
        Ok(self.cell(coord))
    }

    /// Coordinates flipped by the last committed move
    pub fn flipped(&self) -> Result<&[Coord]> {
        self.ensure_started()?;
        Ok(&self.flipped)
    }

    /// Every cell in ascending (y, p, n) order
    pub fn cells(&self) -> Result<impl Iterator<Item = (Coord, Cell)> + '_> {
        self.ensure_started()?;
        Ok(self.ordered_cells())
    }

    /// Number of cells holding the given contents
    pub fn count(&self, cell: Cell) -> Result<usize> {
        self.ensure_started()?;
        Ok(self.count_unchecked(cell))
    }

    pub fn snapshot(&self) -> Result<BoardSnapshot> {
        Ok(BoardSnapshot {
            radius: self.radius()?,
            current: self.current_player()?.color(),
            black_score: self.players[0].score(),
            white_score: self.players[1].score(),
            game_over: self.is_game_over()?,
            cells: self.ordered_cells().collect(),
        })
    }

    fn ordered_cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.order.iter().map(move |c| (*c, self.cells[c]))
    }

    fn count_unchecked(&self, cell: Cell) -> usize {
        self.cells.values().filter(|&&c| c == cell).count()
    }

    fn cell(&self, coord: Coord) -> Option<Cell> {
        self.cells.get(&coord).copied()
    }

    fn current_color(&self) -> Cell {
        self.players[self.current].color()
    }

    // ========================================================================
    // PRECONDITIONS
    // ========================================================================

    fn ensure_started(&self) -> Result<()> {
        if self.started {
            Ok(())
        } else {
            Err(BoardError::NotStarted)
        }
    }

    fn ensure_in_range(&self, coord: Coord) -> Result<()> {
        if is_in_range(coord, self.radius) {
            Ok(())
        } else {
            Err(BoardError::InvalidCoordinate(coord))
        }
    }


    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn is_valid_coordinate(&self, coord: Coord) -> Result<bool> {
        self.ensure_started()?;
        Ok(is_in_range(coord, self.radius))
    }

    /// Empty cell with at least one flank for the current player
    pub fn is_valid_move(&self, coord: Coord) -> Result<bool> {
        self.ensure_started()?;
        self.ensure_in_range(coord)?;
        Ok(self.is_legal_for(coord, self.current_color()))
    }

    /// Directions from `coord` that flank opponent pieces for the current player
    pub fn valid_move_list(&self, coord: Coord) -> Result<Vec<Coord>> {
        self.ensure_started()?;
        self.ensure_in_range(coord)?;
        let color = self.current_color();
        Ok(DIRECTIONS
            .iter()
            .copied()
            .filter(|&dir| self.flank_length(coord, dir, color).is_some())
            .collect())
    }

    /// Pieces a move at `coord` would flip, 0 if it is not legal
    pub fn calculate_flips_if_moved(&self, coord: Coord) -> Result<usize> {
        if !self.is_valid_move(coord)? {
            return Ok(0);
        }
        let color = self.current_color();
        Ok(DIRECTIONS
            .iter()
            .filter_map(|&dir| self.flank_length(coord, dir, color))
            .sum())
    }

    /// All legal moves for the current player in ascending (y, p, n) order
    pub fn legal_moves(&self) -> Result<Vec<Coord>> {
        self.ensure_started()?;
        let color = self.current_color();
        Ok(self
            .order
            .iter()
            .copied()
            .filter(|&c| self.is_legal_for(c, color))
            .collect())
    }

    pub fn has_legal_move(&self) -> Result<bool> {
        self.ensure_started()?;
        let color = self.current_color();
        Ok(self.order.iter().any(|&c| self.is_legal_for(c, color)))
    }

    pub fn contains_empty_cell(&self) -> Result<bool> {
        self.ensure_started()?;
        Ok(self.cells.values().any(|&c| c == Cell::Empty))
    }

    pub fn all_non_empty_same_color(&self) -> Result<bool> {
        self.ensure_started()?;
        let mut pieces = self.cells.values().filter(|c| c.is_piece());
        Ok(match pieces.next() {
            Some(first) => pieces.all(|c| c == first),
            None => true,
        })
    }

    /// No empty cell left, or only one color on the board
    pub fn is_game_over(&self) -> Result<bool> {
        Ok(!self.contains_empty_cell()? || self.all_non_empty_same_color()?)
    }

    /// Compare running scores. Only meaningful once `is_game_over` holds.
    pub fn who_won(&self) -> Result<GameResult> {
        self.ensure_started()?;
        let black = self.players[0].score();
        let white = self.players[1].score();
        Ok(if black > white {
            GameResult::Winner(self.players[0].color())
        } else if white > black {
            GameResult::Winner(self.players[1].color())
        } else {
            GameResult::Tie
        })
    }

    /// Recount a color's pieces on the board. Does not touch the running score.
    pub fn add_up_score(&self, color: Cell) -> Result<u32> {
        self.ensure_started()?;
        Ok(self.count_unchecked(color) as u32)
    }

    fn is_legal_for(&self, coord: Coord, color: Cell) -> bool {
        self.cell(coord) == Some(Cell::Empty)
            && DIRECTIONS
                .iter()
                .any(|&dir| self.flank_length(coord, dir, color).is_some())
    }

    /// Opponent run length from `from` along `dir`, if it ends on `color`
    fn flank_length(&self, from: Coord, dir: Coord, color: Cell) -> Option<usize> {
        let opponent = color.opponent();
        let mut current = from.offset(dir);
        let mut run = 0;

        loop {
            match self.cell(current) {
                Some(c) if c == opponent => run += 1,
                Some(c) if c == color && run > 0 => return Some(run),
                _ => return None, // empty, own color first, or off the board
            }
            current = current.offset(dir);
        }
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Place the current player's piece at `coord` and flip every flank
    pub fn commit_move(&mut self, coord: Coord) -> Result<()> {
        self.flipped.clear();
        self.ensure_started()?;
        // Seat colors are fixed at construction; out-of-turn callers are
        // rejected by `commit_move_as`
        debug_assert_eq!(self.current_color(), SEAT_COLORS[self.current]);
        self.ensure_in_range(coord)?;
        if !self.is_valid_move(coord)? {
            return Err(BoardError::IllegalMove(coord));
        }

        let mover = self.current_color();
        let directions = self.valid_move_list(coord)?;

        self.cells.insert(coord, mover);
        for dir in directions {
            self.flip_ray(coord, dir, mover);
        }

        let flips = self.flipped.len() as u32;
        self.players[self.current].add_score(flips);
        debug!("{} plays {} flipping {}", mover.name(), coord, flips);

        self.switch_player();
        self.notify_observers();
        Ok(())
    }

    /// Commit a move on behalf of `color`, rejecting it when out of turn
    pub fn commit_move_as(&mut self, color: Cell, coord: Coord) -> Result<()> {
        self.ensure_started()?;
        let expected = self.current_color();
        if color != expected {
            self.flipped.clear();
            return Err(BoardError::IllegalTurn { expected, actual: color });
        }
        self.commit_move(coord)
    }

    /// Pass the turn when the current player has no flank from `coord`.
    /// Returns whether the turn changed.
    pub fn skip_turn(&mut self, coord: Coord) -> Result<bool> {
        if !self.valid_move_list(coord)?.is_empty() {
            return Ok(false);
        }
        debug!("{} skips at {}", self.current_color().name(), coord);
        self.switch_player();
        Ok(true)
    }

    /// Overwrite one cell, for setting up positions. No scoring or notification.
    pub fn set_cell(&mut self, coord: Coord, cell: Cell) -> Result<()> {
        self.ensure_started()?;
        self.ensure_in_range(coord)?;
        self.cells.insert(coord, cell);
        Ok(())
    }

    fn flip_ray(&mut self, from: Coord, dir: Coord, color: Cell) {
        let mut current = from.offset(dir);
        while let Some(cell) = self.cell(current) {
            if cell == color {
                break;
            }
            trace!("flip {}", current);
            self.cells.insert(current, color);
            self.flipped.push(current);
            current = current.offset(dir);
        }
    }

    fn switch_player(&mut self) {
        self.current = 1 - self.current;
    }
}

// ============================================================================
// TESTS
// ============================================================================
