//! Play command - interactive game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: resolve_config(), play_session()
//! - Level 3: human_turn(), ai_turn()
//! - Level 4: input parsing

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::Args;

use hexversi_core::{
    Cell, Coord, GameConfig, GameResult, GreedyFlip, HexBoard, Seat, Strategy, StrategyKind,
};

use crate::driver::{is_finished, pass_turn};
use crate::view::render_status;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Game config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Board radius (overrides config)
    #[arg(long)]
    pub radius: Option<i32>,

    /// Black seat: human, greedy, positional or random (overrides config)
    #[arg(long)]
    pub black: Option<String>,

    /// White seat: human, greedy, positional or random (overrides config)
    #[arg(long)]
    pub white: Option<String>,

    /// Write the resolved config to this file and exit
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,
}

/// How a session ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Finished(GameResult),
    Quit,
}

/// One line of human input
#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Move(Coord),
    Pass,
    Hint,
    Quit,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Merge config file and flags
/// 2. Play on stdin/stdout until the game ends or the human quits
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = resolve_config(&args, seed)?;

    if let Some(path) = &args.save_config {
        config.save(path)?;
        tracing::info!("Saved config to {}", path.display());
        return Ok(());
    }

    tracing::info!(
        "Starting game: radius={}, black={:?}, white={:?}",
        config.radius,
        config.black,
        config.white
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let end = play_session(&config, stdin.lock(), stdout.lock())?;
    tracing::debug!("Session ended: {:?}", end);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Config file (or default), then command-line overrides
fn resolve_config(args: &PlayArgs, seed: Option<u64>) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(radius) = args.radius {
        if radius < 0 {
            anyhow::bail!("radius must be non-negative, got {}", radius);
        }
        config.radius = radius;
    }
    if let Some(black) = &args.black {
        config.black = parse_seat(black)?;
    }
    if let Some(white) = &args.white {
        config.white = parse_seat(white)?;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    Ok(config)
}

/// Play one game, reading human moves from `input`
pub fn play_session<R: BufRead, W: Write>(
    config: &GameConfig,
    mut input: R,
    mut out: W,
) -> Result<SessionEnd> {
    let mut board = config.new_board()?;
    let seed = config.seed.unwrap_or(42);
    let black_ai = config.black.strategy(Cell::Black, seed);
    let white_ai = config.white.strategy(Cell::White, seed.wrapping_add(7777));

    // Observer collects move reports; the loop prints them
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    board.add_observer(move |b: &HexBoard| {
        let flips = b.flipped().map_or(0, |f| f.len());
        sink.borrow_mut()
            .push(format!("{} piece(s) flipped", flips));
    });

    let mut passes = 0;

    loop {
        writeln!(out, "{}\n", render_status(&board)?)?;

        if is_finished(&board, passes)? {
            let result = board.who_won()?;
            if !board.is_game_over()? {
                writeln!(out, "Neither player can move.")?;
            }
            writeln!(out, "Game over. Winner: {}", result)?;
            return Ok(SessionEnd::Finished(result));
        }

        let color = board.current_player()?.color();
        let ai = match color {
            Cell::White => white_ai.as_deref(),
            _ => black_ai.as_deref(),
        };

        let passed = match ai {
            Some(strategy) => ai_turn(&mut board, strategy, &mut out)?,
            None => match human_turn(&mut board, color, &mut input, &mut out)? {
                Some(passed) => passed,
                None => return Ok(SessionEnd::Quit),
            },
        };
        passes = if passed { passes + 1 } else { 0 };

        for event in events.borrow_mut().drain(..) {
            writeln!(out, "{}", event)?;
        }
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Let a strategy move. Returns whether it passed.
fn ai_turn<W: Write>(board: &mut HexBoard, strategy: &dyn Strategy, out: &mut W) -> Result<bool> {
    let color = strategy.color();
    match strategy.determine_move(board)? {
        Some(mv) => {
            board.commit_move_as(color, mv)?;
            writeln!(out, "{} plays {}", color.name(), mv)?;
            Ok(false)
        }
        None => {
            pass_turn(board)?;
            writeln!(out, "{} has no legal move and passes", color.name())?;
            Ok(true)
        }
    }
}

/// Read commands until the human makes a move or passes.
/// Returns whether they passed, or `None` on quit / end of input.
fn human_turn<R: BufRead, W: Write>(
    board: &mut HexBoard,
    color: Cell,
    input: &mut R,
    out: &mut W,
) -> Result<Option<bool>> {
    loop {
        write!(out, "{}> ", color.name())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "{}", msg)?;
                continue;
            }
        };

        match command {
            Command::Quit => return Ok(None),
            Command::Hint => match GreedyFlip::new(color).determine_move(board)? {
                Some(mv) => writeln!(out, "Try {}", mv)?,
                None => writeln!(out, "No legal move; type `pass`")?,
            },
            Command::Pass => {
                if pass_turn(board)? {
                    return Ok(Some(true));
                }
                writeln!(out, "You still have a legal move")?;
            }
            Command::Move(coord) => match board.commit_move_as(color, coord) {
                Ok(()) => return Ok(Some(false)),
                Err(e) => writeln!(out, "Error: {}", e)?,
            },
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    match line.trim().to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "p" | "pass" => Ok(Command::Pass),
        "h" | "hint" => Ok(Command::Hint),
        other => other
            .parse::<Coord>()
            .map(Command::Move)
            .map_err(|e| format!("{}; commands: `y p n`, pass, hint, quit", e)),
    }
}

fn parse_seat(s: &str) -> Result<Seat> {
    if s.trim().eq_ignore_ascii_case("human") {
        return Ok(Seat::Human);
    }
    s.parse::<StrategyKind>()
        .map(Seat::Ai)
        .map_err(|e| anyhow::anyhow!(e))
}
