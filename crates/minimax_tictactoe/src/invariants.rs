//! Invariants the coordinator keeps between transitions.
//!
//! Each invariant is a logical property of a board together with the move
//! history that produced it. The coordinator checks them in debug builds
//! after every placement.

use super::{Board, Move, Side};

/// A board and the moves that produced it.
#[derive(Debug, Clone, Copy)]
pub struct GameRecord<'a> {
    /// Current board.
    pub board: &'a Board,
    /// Accepted moves since the last reset, oldest first.
    pub history: &'a [Move],
    /// Side that moved first this round.
    pub opener: Side,
}

/// A logical property that must hold for every game record.
pub trait Invariant {
    /// Checks if the invariant holds.
    fn holds(record: &GameRecord<'_>) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Invariant: cells are write-once.
///
/// Replaying the history onto an empty board must never hit an occupied
/// cell and must reproduce the current board exactly.
pub struct MonotonicBoardInvariant;

impl Invariant for MonotonicBoardInvariant {
    fn holds(record: &GameRecord<'_>) -> bool {
        let mut replayed = Board::new();
        for mv in record.history {
            if replayed.place_at(mv.position, mv.side).is_err() {
                return false;
            }
        }
        replayed == *record.board
    }

    fn description() -> &'static str {
        "Board cells are write-once and match the move history"
    }
}

/// Invariant: sides alternate, starting with the opener.
pub struct AlternatingTurnInvariant;

impl Invariant for AlternatingTurnInvariant {
    fn holds(record: &GameRecord<'_>) -> bool {
        let mut expected = record.opener;
        for mv in record.history {
            if mv.side != expected {
                return false;
            }
            expected = expected.opponent();
        }
        true
    }

    fn description() -> &'static str {
        "Sides alternate, starting with the opener"
    }
}

/// Checks every game invariant, collecting all violations.
pub fn check_all(record: &GameRecord<'_>) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = Vec::new();

    if !MonotonicBoardInvariant::holds(record) {
        violations.push(InvariantViolation::new(
            MonotonicBoardInvariant::description(),
        ));
    }

    if !AlternatingTurnInvariant::holds(record) {
        violations.push(InvariantViolation::new(
            AlternatingTurnInvariant::description(),
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
