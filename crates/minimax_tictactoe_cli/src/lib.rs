//! Console front end for the minimax tic-tac-toe engine.
//!
//! The engine has no presentation of its own; this crate renders its
//! notifications on a terminal, turns typed lines into move requests and
//! offers an offline position analyzer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analyze;
pub mod cli;
pub mod config;
pub mod console;

pub use analyze::{Analysis, MoveScore, analyze, format_scores, render_text};
pub use cli::{Cli, Command, SideArg};
pub use config::{ConfigError, ConsoleConfig};
pub use console::{Console, ConsoleCommand, Flow, InputError, parse_command, render_event, status_text};
