//! Line-oriented console front end.
//!
//! Reads commands from any async line source, forwards moves to the
//! [`Coordinator`] and renders the notifications it sends back.

use crate::analyze::{analyze, format_scores};
use crate::config::ConsoleConfig;
use derive_more::{Display, Error};
use minimax_tictactoe::{Coordinator, GameEvent, GamePhase, Outcome, Position, Side, Snapshot};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Something the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Place a mark at a 0-based `(row, col)`.
    Place {
        /// Row, 0-based.
        row: usize,
        /// Column, 0-based.
        col: usize,
    },
    /// Start a new round.
    Reset,
    /// Show the score of every legal move.
    Hint,
    /// Leave the session.
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InputError {
    /// Blank line.
    #[display("empty input")]
    Empty,
    /// Text that matches no command.
    #[display("unrecognized input {input:?}")]
    Unrecognized {
        /// The offending text.
        input: String,
    },
}

/// Parses one input line.
///
/// Accepts `row col` (0-based, space or comma separated), a keypad digit
/// `1`-`9` counting row-major from the top-left cell, or one of `reset`,
/// `hint` and `quit` (first letter suffices).
pub fn parse_command(line: &str) -> Result<ConsoleCommand, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    match trimmed.to_lowercase().as_str() {
        "reset" | "r" | "new" => return Ok(ConsoleCommand::Reset),
        "hint" | "h" => return Ok(ConsoleCommand::Hint),
        "quit" | "q" | "exit" => return Ok(ConsoleCommand::Quit),
        _ => {}
    }

    let unrecognized = || InputError::Unrecognized {
        input: trimmed.to_string(),
    };

    let parts: Vec<&str> = trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [digit] => {
            let pos = digit
                .parse::<usize>()
                .ok()
                .filter(|d| (1..=9).contains(d))
                .and_then(|d| Position::from_index(d - 1))
                .ok_or_else(unrecognized)?;
            Ok(ConsoleCommand::Place {
                row: pos.row(),
                col: pos.col(),
            })
        }
        [row, col] => {
            let row = row.parse().map_err(|_| unrecognized())?;
            let col = col.parse().map_err(|_| unrecognized())?;
            Ok(ConsoleCommand::Place { row, col })
        }
        _ => Err(unrecognized()),
    }
}

/// Status line for a phase, from the human's point of view.
pub fn status_text(phase: GamePhase, human: Side) -> String {
    match phase {
        GamePhase::AwaitingMove(side) if side == human => "Your Turn".to_string(),
        GamePhase::AwaitingMove(_) => "AI's Turn".to_string(),
        GamePhase::Finished(Outcome::Draw) => "It's a Tie!".to_string(),
        GamePhase::Finished(Outcome::Win(side)) => format!("{side} wins!"),
        GamePhase::Finished(Outcome::InProgress) => "Game in progress".to_string(),
    }
}

/// Renders one notification.
pub fn render_event(event: &GameEvent, human: Side) -> String {
    match event {
        GameEvent::RoundStarted(snapshot) => {
            format!(
                "{}\nNew Game! {}",
                snapshot.board,
                status_text(snapshot.phase, human)
            )
        }
        GameEvent::MovePlayed { mv, snapshot } => {
            let who = if mv.side == human { "You" } else { "AI" };
            format!(
                "{who} played {}\n{}\n{}",
                mv.position,
                snapshot.board,
                status_text(snapshot.phase, human)
            )
        }
    }
}

/// Whether the session goes on after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input.
    Continue,
    /// Stop the session.
    Quit,
}

/// Interactive session writing to `W`.
pub struct Console<W> {
    game: Coordinator,
    events: mpsc::UnboundedReceiver<GameEvent>,
    config: ConsoleConfig,
    out: W,
}

impl<W: Write> Console<W> {
    /// Creates a session and its first round.
    pub fn new(config: ConsoleConfig, out: W) -> Self {
        let mut game = Coordinator::new(config.seating());
        let events = game.subscribe();
        Self {
            game,
            events,
            config,
            out,
        }
    }

    /// Current state of the game.
    pub fn state(&self) -> Snapshot {
        self.game.current_state()
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Runs the session until `quit` or end of input.
    #[instrument(skip_all)]
    pub async fn run<R>(&mut self, input: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.intro()?;
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if self.handle_line(&line)? == Flow::Quit {
                break;
            }
            self.prompt()?;
        }
        info!("Session ended");
        Ok(())
    }

    /// Handles one line of input.
    pub fn handle_line(&mut self, line: &str) -> std::io::Result<Flow> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(InputError::Empty) => return Ok(Flow::Continue),
            Err(e) => {
                writeln!(
                    self.out,
                    "{e}. Enter `row col`, a digit 1-9, hint, reset or quit."
                )?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "Console command");

        match command {
            ConsoleCommand::Place { row, col } => self.place(row, col)?,
            ConsoleCommand::Reset => {
                self.game.reset();
                self.drain_events()?;
            }
            ConsoleCommand::Hint => self.hint()?,
            ConsoleCommand::Quit => {
                writeln!(self.out, "Bye!")?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn intro(&mut self) -> std::io::Result<()> {
        let state = self.game.current_state();
        writeln!(
            self.out,
            "{}\nNew Game! {}",
            state.board,
            status_text(state.phase, *self.config.human())
        )?;
        self.prompt()
    }

    fn prompt(&mut self) -> std::io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }

    fn place(&mut self, row: usize, col: usize) -> std::io::Result<()> {
        match self.game.submit_human_move(row, col) {
            Ok(phase) => {
                self.drain_events()?;
                if phase.is_finished() {
                    if *self.config.auto_reset() {
                        self.game.reset();
                        self.drain_events()?;
                    } else {
                        writeln!(self.out, "Type `reset` to play again.")?;
                    }
                } else if *self.config.show_scores() {
                    self.hint()?;
                }
            }
            Err(e) => writeln!(self.out, "{e}")?,
        }
        Ok(())
    }

    fn hint(&mut self) -> std::io::Result<()> {
        match analyze(self.game.board(), Some(*self.config.human())) {
            Ok(analysis) if analysis.moves.is_empty() => {
                writeln!(self.out, "No hint: {}", analysis.outcome)?
            }
            Ok(analysis) => write!(self.out, "{}", format_scores(&analysis.moves, analysis.best))?,
            Err(e) => writeln!(self.out, "No hint: {e}")?,
        }
        Ok(())
    }

    fn drain_events(&mut self) -> std::io::Result<()> {
        let human = *self.config.human();
        while let Ok(event) = self.events.try_recv() {
            writeln!(self.out, "{}", render_event(&event, human))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(
            parse_command("1 2"),
            Ok(ConsoleCommand::Place { row: 1, col: 2 })
        );
        assert_eq!(
            parse_command(" 0,0 "),
            Ok(ConsoleCommand::Place { row: 0, col: 0 })
        );
        // Range checks belong to the board.
        assert_eq!(
            parse_command("5 7"),
            Ok(ConsoleCommand::Place { row: 5, col: 7 })
        );
    }

    #[test]
    fn test_parse_keypad_digit() {
        assert_eq!(
            parse_command("1"),
            Ok(ConsoleCommand::Place { row: 0, col: 0 })
        );
        assert_eq!(
            parse_command("6"),
            Ok(ConsoleCommand::Place { row: 1, col: 2 })
        );
        assert!(parse_command("0").is_err());
        assert!(parse_command("10").is_err());
    }

    #[test]
    fn test_parse_words() {
        assert_eq!(parse_command("RESET"), Ok(ConsoleCommand::Reset));
        assert_eq!(parse_command("h"), Ok(ConsoleCommand::Hint));
        assert_eq!(parse_command("quit"), Ok(ConsoleCommand::Quit));
        assert_eq!(parse_command("   "), Err(InputError::Empty));
        assert!(matches!(
            parse_command("a b"),
            Err(InputError::Unrecognized { .. })
        ));
    }

    #[test]
    fn test_status_texts() {
        let human = Side::First;
        assert_eq!(
            status_text(GamePhase::AwaitingMove(Side::First), human),
            "Your Turn"
        );
        assert_eq!(
            status_text(GamePhase::AwaitingMove(Side::Second), human),
            "AI's Turn"
        );
        assert_eq!(
            status_text(GamePhase::Finished(Outcome::Draw), human),
            "It's a Tie!"
        );
        assert_eq!(
            status_text(GamePhase::Finished(Outcome::Win(Side::First)), human),
            "X wins!"
        );
    }

    #[test]
    fn test_rejected_move_is_reported() {
        let mut console = Console::new(ConsoleConfig::default(), Vec::new());
        console.handle_line("1 1").unwrap();
        console.handle_line("1 1").unwrap();

        let text = String::from_utf8(console.output().clone()).unwrap();
        assert!(text.contains("cell (1, 1) is already marked"));
    }
}
