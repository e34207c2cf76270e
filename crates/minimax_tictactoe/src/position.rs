//! The nine board coordinates.

use super::error::BoardError;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::instrument;

/// A coordinate on the board.
///
/// Variants are declared in row-major order, so iteration order is the
/// search's tie-break order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum Position {
    /// Row 0, column 0.
    TopLeft,
    /// Row 0, column 1.
    TopCenter,
    /// Row 0, column 2.
    TopRight,
    /// Row 1, column 0.
    MiddleLeft,
    /// Row 1, column 1.
    Center,
    /// Row 1, column 2.
    MiddleRight,
    /// Row 2, column 0.
    BottomLeft,
    /// Row 2, column 1.
    BottomCenter,
    /// Row 2, column 2.
    BottomRight,
}

impl Position {
    /// All 9 positions, row-major.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Creates a position from a `(row, col)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] unless both values are in `0..3`.
    #[instrument]
    pub fn from_coords(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= 3 || col >= 3 {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Self::from_index(row * 3 + col).ok_or(BoardError::OutOfBounds { row, col })
    }

    /// Creates a position from its row-major index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row-major index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Row, 0-2.
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column, 0-2.
    pub fn col(self) -> usize {
        self.to_index() % 3
    }

    /// `(row, col)` pair.
    pub fn coords(self) -> (usize, usize) {
        (self.row(), self.col())
    }

    /// Label for display.
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Parses a label (case-insensitive) such as `"top-left"` or `"center"`.
    #[instrument]
    pub fn from_label(s: &str) -> Option<Position> {
        let wanted = s.trim().to_lowercase();
        Position::iter().find(|pos| pos.label().to_lowercase() == wanted)
    }
}

impl TryFrom<(usize, usize)> for Position {
    type Error = BoardError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Self::from_coords(row, col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.label(), self.row(), self.col())
    }
}
