//! Tic-tac-toe console entry point.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use minimax_tictactoe::{Board, Side};
use minimax_tictactoe_cli::{Cli, Command, Console, ConsoleConfig, analyze, render_text};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // stdout belongs to the board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play {
            config,
            human,
            computer_first,
            auto_reset,
        } => run_play(config, human.map(Side::from), computer_first, auto_reset).await,
        Command::Analyze { board, side, json } => run_analyze(&board, side.map(Side::from), json),
    }
}

/// Runs an interactive game on stdin/stdout.
#[instrument]
async fn run_play(
    config_path: PathBuf,
    human: Option<Side>,
    computer_first: bool,
    auto_reset: bool,
) -> Result<()> {
    let config = ConsoleConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?
        .with_overrides(human, computer_first, auto_reset);
    info!(?config, "Starting console session");

    let mut console = Console::new(config, std::io::stdout());
    console.run(BufReader::new(tokio::io::stdin())).await
}

/// Prints the score of every legal move of a position.
#[instrument]
fn run_analyze(board: &str, side: Option<Side>, json: bool) -> Result<()> {
    let board: Board = board.parse().context("Invalid board notation")?;
    let analysis = analyze(&board, side)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render_text(&board, &analysis));
    }
    Ok(())
}
