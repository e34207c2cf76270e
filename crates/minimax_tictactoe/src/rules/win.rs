//! Win detection logic for tic-tac-toe.

use crate::{Board, Position, Side};

/// The eight winning lines: three rows, three columns, two diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(side)` for the first complete line found, `None` otherwise.
/// Not instrumented: the search calls this once per node.
pub fn check_winner(board: &Board) -> Option<Side> {
    LINES.iter().find_map(|&line| line_owner(board, line))
}

/// Returns the side holding all three cells of a line.
pub fn line_owner(board: &Board, [a, b, c]: [Position; 3]) -> Option<Side> {
    let side = board.get(a).side()?;
    (board.get(b).side() == Some(side) && board.get(c).side() == Some(side)).then_some(side)
}
