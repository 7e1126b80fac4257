//! HEXVERSI CLI - Command-line interface
//!
//! Commands:
//! - show: Print the starting board
//! - play: Play a game in the terminal
//! - match: Play computer-vs-computer games

mod driver;
mod match_cmd;
mod play_cmd;
mod view;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexversi_core::{HexBoard, DEFAULT_RADIUS};

#[derive(Parser)]
#[command(name = "hexversi")]
#[command(about = "Reversi on a hexagonal board")]
struct Cli {
    /// Random seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log filter when RUST_LOG is unset (e.g. debug, hexversi_core=trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the starting board
    Show(ShowArgs),
    /// Play a game in the terminal
    Play(play_cmd::PlayArgs),
    /// Play computer-vs-computer games
    Match(match_cmd::MatchArgs),
}

#[derive(Args)]
struct ShowArgs {
    /// Board radius
    #[arg(long, default_value_t = DEFAULT_RADIUS)]
    radius: i32,

    /// Print a JSON snapshot instead of the text board
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Show(args) => show(args),
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}

/// Logs go to stderr so the board on stdout stays readable
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn show(args: ShowArgs) -> Result<()> {
    let board = HexBoard::new(args.radius)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&board.snapshot()?)?);
    } else {
        println!("{}", view::render_status(&board)?);
    }
    Ok(())
}
