//! Match command - play computer-vs-computer games between two strategies
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: driver::play_ai_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;

use hexversi_core::{Cell, GameResult, StrategyKind, DEFAULT_RADIUS};

use crate::driver::{play_ai_game, GameRecord};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Strategy playing Black (greedy, positional, random)
    #[arg(long, default_value = "greedy")]
    pub black: StrategyKind,

    /// Strategy playing White (greedy, positional, random)
    #[arg(long, default_value = "positional")]
    pub white: StrategyKind,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Board radius
    #[arg(long, default_value_t = DEFAULT_RADIUS)]
    pub radius: i32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    black_wins: usize,
    white_wins: usize,
    ties: usize,
    blocked: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Play the match (games in parallel)
/// 2. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    if args.radius < 0 {
        anyhow::bail!("radius must be non-negative, got {}", args.radius);
    }

    tracing::info!(
        "Starting match: {} vs {} ({} games, radius={})",
        args.black,
        args.white,
        args.games,
        args.radius
    );

    let results = play_match(&args, seed.unwrap_or(42))?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games. Each game gets its own board and seed.
fn play_match(args: &MatchArgs, base_seed: u64) -> Result<MatchResults> {
    let games: Vec<GameRecord> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let seed = base_seed.wrapping_add(i as u64 * 12345);
            play_ai_game(i + 1, args.radius, args.black, args.white, seed)
        })
        .collect::<hexversi_core::Result<_>>()
        .context("Match game failed")?;

    for record in &games {
        tracing::info!(
            "Game {}: {} ({} moves, {}-{})",
            record.game_number,
            record.result,
            record.moves,
            record.black_score,
            record.white_score
        );
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results, args);
    } else {
        print_text_results(results, args);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let black_wins = games
        .iter()
        .filter(|g| g.result == GameResult::Winner(Cell::Black))
        .count();
    let white_wins = games
        .iter()
        .filter(|g| g.result == GameResult::Winner(Cell::White))
        .count();
    let ties = games.iter().filter(|g| g.result == GameResult::Tie).count();
    let blocked = games.iter().filter(|g| g.blocked).count();

    let total_moves: usize = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        black_wins,
        white_wins,
        ties,
        blocked,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        result: String,
        moves: usize,
        black_score: u32,
        white_score: u32,
        blocked: bool,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        black: StrategyKind,
        white: StrategyKind,
        radius: i32,
        total_games: usize,
        black_wins: usize,
        white_wins: usize,
        ties: usize,
        blocked: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        black: args.black,
        white: args.white,
        radius: args.radius,
        total_games: results.games.len(),
        black_wins: results.black_wins,
        white_wins: results.white_wins,
        ties: results.ties,
        blocked: results.blocked,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: g.result.to_string(),
                moves: g.moves,
                black_score: g.black_score,
                white_score: g.white_score,
                blocked: g.blocked,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Black ({}) vs White ({}), radius {}", args.black, args.white, args.radius);
    println!("Total games: {}", total);
    println!(
        "Black wins:  {} ({:.1}%)",
        results.black_wins,
        percent(results.black_wins, total)
    );
    println!(
        "White wins:  {} ({:.1}%)",
        results.white_wins,
        percent(results.white_wins, total)
    );
    println!("Ties:        {} ({:.1}%)", results.ties, percent(results.ties, total));
    println!("Blocked:     {}", results.blocked);
    println!("Avg moves:   {:.1}", results.avg_moves);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(result: GameResult, moves: usize) -> GameRecord {
        GameRecord {
            game_number: 1,
            result,
            moves,
            black_score: 0,
            white_score: 0,
            blocked: false,
        }
    }

    #[test]
    fn test_statistics() {
        let stats = compute_match_statistics(vec![
            record(GameResult::Winner(Cell::Black), 10),
            record(GameResult::Winner(Cell::Black), 20),
            record(GameResult::Winner(Cell::White), 30),
            record(GameResult::Tie, 20),
        ]);
        assert_eq!(stats.black_wins, 2);
        assert_eq!(stats.white_wins, 1);
        assert_eq!(stats.ties, 1);
        assert_eq!(stats.avg_moves, 20.0);
    }

    #[test]
    fn test_empty_match() {
        let stats = compute_match_statistics(Vec::new());
        assert_eq!(stats.avg_moves, 0.0);
        assert_eq!(percent(0, 0), 0.0);
    }
}
