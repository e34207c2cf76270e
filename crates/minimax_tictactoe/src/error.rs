//! Error types for board mutation, turn handling and search.

use super::types::Side;
use derive_more::{Display, Error};

/// Error raised by the board when a placement is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Coordinate outside the 3x3 grid.
    #[display("coordinate ({row}, {col}) is outside the 3x3 grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// Target cell already holds a mark.
    #[display("cell ({row}, {col}) is already marked")]
    CellOccupied {
        /// Row of the occupied cell.
        row: usize,
        /// Column of the occupied cell.
        col: usize,
    },

    /// Board notation contained a character that is not a cell.
    #[display("unexpected character {found:?} in board notation")]
    InvalidNotation {
        /// The offending character.
        found: char,
    },

    /// Board notation did not describe exactly nine cells.
    #[display("board notation has {found} cells, expected 9")]
    WrongCellCount {
        /// Number of cells found.
        found: usize,
    },
}

/// Error raised by the move search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SearchError {
    /// Search was asked for a move on a full or already decided board.
    #[display("no legal move: the board is full or the game is already decided")]
    NoLegalMove,
}

/// Error returned to the presentation layer when a move submission fails.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The requested placement is illegal on the current board.
    #[display("invalid move: {source}")]
    InvalidMove {
        /// Why the board rejected the placement.
        source: BoardError,
    },

    /// The game is not waiting for this side.
    #[display("invalid move: waiting for {expected} to move")]
    NotYourTurn {
        /// Side the game is waiting for.
        expected: Side,
    },

    /// The game has finished; only a reset is accepted.
    #[display("the game is over, reset to play again")]
    GameOver,

    /// The computer could not find a move.
    #[display("computer move failed: {source}")]
    Search {
        /// Underlying search failure.
        source: SearchError,
    },
}

impl From<BoardError> for MoveError {
    #[track_caller]
    fn from(source: BoardError) -> Self {
        Self::InvalidMove { source }
    }
}

impl From<SearchError> for MoveError {
    #[track_caller]
    fn from(source: SearchError) -> Self {
        Self::Search { source }
    }
}
