//! Exhaustive minimax search for the computer's move.
//!
//! The search explores the full game tree with explicit place/undo
//! backtracking on the caller's board. Every simulated mark is removed
//! before the next branch is tried, so the board handed in is the board
//! handed back.
//!
//! Terminal scores are discounted by ply: a win found at depth `d` is worth
//! `WIN_SCORE - d` and a loss `d - WIN_SCORE`, so among equal outcomes the
//! search prefers faster wins and slower losses.

use super::error::SearchError;
use super::phases::Outcome;
use super::position::Position;
use super::rules::classify;
use super::types::{Board, Side};
use tracing::{debug, instrument};

/// Score of an immediate win for the searching side.
pub const WIN_SCORE: i32 = 10;

/// Score of an immediate loss for the searching side.
pub const LOSS_SCORE: i32 = -WIN_SCORE;

/// Minimax evaluator for one search.
struct Minimax {
    searching: Side,
    opponent: Side,
    nodes: u64,
}

impl Minimax {
    fn new(searching: Side, opponent: Side) -> Self {
        debug_assert_ne!(searching, opponent, "sides must differ");
        Self {
            searching,
            opponent,
            nodes: 0,
        }
    }

    /// Scores `board` from the searching side's point of view.
    ///
    /// `maximizing` is true when the searching side is to move.
    fn score(&mut self, board: &mut Board, depth: i32, maximizing: bool) -> i32 {
        self.nodes += 1;

        match classify(board) {
            Outcome::Win(side) if side == self.searching => return WIN_SCORE - depth,
            Outcome::Win(_) => return depth - WIN_SCORE,
            Outcome::Draw => return 0,
            Outcome::InProgress => {}
        }

        let mover = if maximizing {
            self.searching
        } else {
            self.opponent
        };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for pos in Position::ALL {
            if board.place_at(pos, mover).is_err() {
                continue;
            }
            let score = self.score(board, depth + 1, !maximizing);
            board.clear(pos);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    /// Scores every legal move of the searching side, row-major.
    fn root_scores(&mut self, board: &mut Board) -> Vec<(Position, i32)> {
        let mut scored = Vec::with_capacity(9);
        for pos in Position::ALL {
            if board.place_at(pos, self.searching).is_err() {
                continue;
            }
            let score = self.score(board, 0, false);
            board.clear(pos);
            scored.push((pos, score));
        }
        scored
    }
}

fn check_searchable(board: &Board) -> Result<(), SearchError> {
    if classify(board).is_terminal() {
        return Err(SearchError::NoLegalMove);
    }
    Ok(())
}

/// Scores every legal move for `searching`, in row-major order.
///
/// The board is borrowed mutably for simulation and is unchanged on return.
///
/// # Errors
///
/// Returns [`SearchError::NoLegalMove`] if the board is full or already won.
#[instrument(skip(board), fields(board = %board))]
pub fn score_moves(
    board: &mut Board,
    searching: Side,
    opponent: Side,
) -> Result<Vec<(Position, i32)>, SearchError> {
    check_searchable(board)?;

    #[cfg(debug_assertions)]
    let before = board.clone();

    let mut search = Minimax::new(searching, opponent);
    let scored = search.root_scores(board);

    #[cfg(debug_assertions)]
    debug_assert_eq!(*board, before, "search leaked a simulated mark");

    debug!(nodes = search.nodes, moves = scored.len(), "Scored moves");
    Ok(scored)
}

/// Returns the optimal move for `searching`.
///
/// Ties between equally scored moves go to the first one in row-major
/// order: a later move replaces the current best only if it scores strictly
/// higher. The result is a pure function of the inputs.
///
/// # Errors
///
/// Returns [`SearchError::NoLegalMove`] if the board is full or already won.
#[instrument(skip(board), fields(board = %board))]
pub fn best_move(board: &mut Board, searching: Side, opponent: Side) -> Result<Position, SearchError> {
    let scored = score_moves(board, searching, opponent)?;

    let mut best: Option<(Position, i32)> = None;
    for (pos, score) in scored {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    let (pos, score) = best.ok_or(SearchError::NoLegalMove)?;
    debug!(position = ?pos, score, "Selected move");
    Ok(pos)
}
