//! Board outcomes and game phases.

use super::types::Side;
use serde::{Deserialize, Serialize};

/// Classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line is complete and at least one cell is empty.
    InProgress,
    /// A side completed a line.
    Win(Side),
    /// The board is full and no line is complete.
    Draw,
}

impl Outcome {
    /// Returns true for [`Outcome::Win`] and [`Outcome::Draw`].
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Win(side) => Some(*side),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win(side) => write!(f, "{} wins", side),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// State of the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the given side to move.
    AwaitingMove(Side),
    /// Game over; the outcome is always terminal.
    Finished(Outcome),
}

impl GamePhase {
    /// Returns true once the game has an outcome.
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::Finished(_))
    }

    /// Side to move, if the game is still running.
    pub fn to_move(&self) -> Option<Side> {
        match self {
            GamePhase::AwaitingMove(side) => Some(*side),
            GamePhase::Finished(_) => None,
        }
    }
}
