//! Position analysis: the score of every legal move.

use minimax_tictactoe::{
    Board, Outcome, Position, SearchError, Side, best_move, classify, score_moves,
};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::instrument;

/// Minimax score of one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveScore {
    /// Target cell.
    pub position: Position,
    /// Row of the target cell.
    pub row: usize,
    /// Column of the target cell.
    pub col: usize,
    /// Score from the analyzed side's point of view.
    pub score: i32,
}

/// Result of analyzing a position for one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Side the scores are computed for.
    pub side: Side,
    /// Classification of the position.
    pub outcome: Outcome,
    /// Move the computer would play; `None` on a finished board.
    pub best: Option<Position>,
    /// Every legal move in row-major order.
    pub moves: Vec<MoveScore>,
}

/// Scores every legal move of `board` for `side`.
///
/// When `side` is `None` it is inferred from the mark counts, assuming X
/// moved first. A finished board yields its outcome and no moves.
#[instrument(skip(board), fields(board = %board))]
pub fn analyze(board: &Board, side: Option<Side>) -> Result<Analysis, SearchError> {
    let side = side.unwrap_or_else(|| board.side_to_move());
    let outcome = classify(board);

    if outcome.is_terminal() {
        return Ok(Analysis {
            side,
            outcome,
            best: None,
            moves: Vec::new(),
        });
    }

    let mut scratch = board.clone();
    let moves = score_moves(&mut scratch, side, side.opponent())?
        .into_iter()
        .map(|(position, score)| MoveScore {
            position,
            row: position.row(),
            col: position.col(),
            score,
        })
        .collect();
    let best = best_move(&mut scratch, side, side.opponent())?;

    Ok(Analysis {
        side,
        outcome,
        best: Some(best),
        moves,
    })
}

/// Renders moves as an aligned table, marking the best one.
pub fn format_scores(moves: &[MoveScore], best: Option<Position>) -> String {
    let mut out = String::new();
    for mv in moves {
        let marker = if Some(mv.position) == best { '*' } else { ' ' };
        let label = mv.position.to_string();
        let _ = writeln!(out, "{marker} {label:<22} {:>3}", mv.score);
    }
    out
}

/// Renders an analysis for the terminal.
pub fn render_text(board: &Board, analysis: &Analysis) -> String {
    let mut out = format!("{board}\n\n");
    if analysis.outcome.is_terminal() {
        out.push_str(&format!("Game over: {}\n", analysis.outcome));
        return out;
    }
    out.push_str(&format!("{} to move\n", analysis.side));
    out.push_str(&format_scores(&analysis.moves, analysis.best));
    out
}
