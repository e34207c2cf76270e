//! Command-line interface for the tic-tac-toe console.

use clap::{Parser, Subcommand, ValueEnum};
use minimax_tictactoe::Side;
use std::path::PathBuf;

/// Tic-tac-toe against a computer that never loses
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against an exhaustive minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on the console
    Play {
        /// Path to the console config file (defaults apply if it is missing)
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: PathBuf,

        /// Side the human plays
        #[arg(long, value_enum)]
        human: Option<SideArg>,

        /// Let the computer place the first mark of every round
        #[arg(long)]
        computer_first: bool,

        /// Start a new round automatically after a finished game
        #[arg(long)]
        auto_reset: bool,
    },

    /// Score every legal move of a position
    Analyze {
        /// Board as nine cells of X, O and '.', row by row (e.g. "X.O .X. ...")
        #[arg(short, long)]
        board: String,

        /// Side to analyze for; inferred from the mark counts if omitted
        #[arg(long, value_enum)]
        side: Option<SideArg>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Side as written on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideArg {
    /// Plays X and moves first
    X,
    /// Plays O
    O,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::X => Side::First,
            SideArg::O => Side::Second,
        }
    }
}
