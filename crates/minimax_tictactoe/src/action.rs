//! First-class move records.

use super::{Position, Side};
use serde::{Deserialize, Serialize};

/// A side placing its mark at a position.
///
/// The coordinator keeps one per accepted placement as the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The side making the move.
    pub side: Side,
    /// Where the mark was placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(side: Side, position: Position) -> Self {
        Self { side, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.side, self.position)
    }
}
