//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board. Rules are kept apart from board
//! storage so the search and the coordinator share one definition.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, line_owner};

use crate::{Board, Outcome};

/// Classifies a board.
///
/// Lines are checked before fullness, so a full board that contains a
/// complete line is a win, not a draw.
pub fn classify(board: &Board) -> Outcome {
    if let Some(side) = check_winner(board) {
        return Outcome::Win(side);
    }
    if board.empty_cells().next().is_some() {
        return Outcome::InProgress;
    }
    Outcome::Draw
}
