//! Turn coordination between the human and the computer.
//!
//! The [`Coordinator`] owns the only board of a session. The presentation
//! layer drives it through [`Coordinator::submit_human_move`] and
//! [`Coordinator::reset`], and observes it through [`GameEvent`]s delivered
//! on channels handed out by [`Coordinator::subscribe`].

use super::action::Move;
use super::error::{MoveError, SearchError};
use super::invariants::{GameRecord, check_all};
use super::phases::{GamePhase, Outcome};
use super::rules::classify;
use super::search::best_move;
use super::types::{Board, Side};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Who controls a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participant {
    /// Moves arrive through [`Coordinator::submit_human_move`].
    #[default]
    Human,
    /// Moves are chosen by the minimax search.
    Computer,
}

/// Assignment of participants to sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seating {
    /// Side played by the human.
    pub human: Side,
    /// Participant that places the first mark of each round.
    pub opener: Participant,
}

impl Default for Seating {
    fn default() -> Self {
        Self {
            human: Side::First,
            opener: Participant::Human,
        }
    }
}

impl Seating {
    /// Side played by the computer.
    pub fn computer(&self) -> Side {
        self.human.opponent()
    }

    /// Side that places the first mark of each round.
    pub fn opening_side(&self) -> Side {
        match self.opener {
            Participant::Human => self.human,
            Participant::Computer => self.computer(),
        }
    }
}

/// Read-only view of the game: the board and the phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Board at the time of the snapshot.
    pub board: Board,
    /// Phase at the time of the snapshot.
    pub phase: GamePhase,
}

/// Notification sent to subscribers after every accepted transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// The board was cleared and a new round began.
    RoundStarted(Snapshot),
    /// A mark was placed.
    MovePlayed {
        /// The placement.
        mv: Move,
        /// State after the placement.
        snapshot: Snapshot,
    },
}

impl GameEvent {
    /// State carried by the event.
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            GameEvent::RoundStarted(snapshot) => snapshot,
            GameEvent::MovePlayed { snapshot, .. } => snapshot,
        }
    }
}

/// Turn state machine for one play session.
///
/// Every call runs to completion: a human move that does not end the game
/// is answered by the computer before `submit_human_move` returns, so the
/// caller only ever observes `AwaitingMove(human)` or `Finished`.
#[derive(Debug)]
pub struct Coordinator {
    board: Board,
    phase: GamePhase,
    seating: Seating,
    history: Vec<Move>,
    subscribers: Vec<mpsc::UnboundedSender<GameEvent>>,
}

impl Coordinator {
    /// Creates a coordinator and starts the first round.
    ///
    /// If the computer opens, its first mark is already on the board.
    pub fn new(seating: Seating) -> Self {
        let mut coordinator = Self {
            board: Board::new(),
            phase: GamePhase::AwaitingMove(seating.opening_side()),
            seating,
            history: Vec::new(),
            subscribers: Vec::new(),
        };
        coordinator.reset();
        coordinator
    }

    /// Returns the seating this coordinator was created with.
    pub fn seating(&self) -> Seating {
        self.seating
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Moves accepted since the last reset, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns a snapshot of the board and phase.
    pub fn current_state(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            phase: self.phase,
        }
    }

    /// Opens a notification channel.
    ///
    /// The receiver gets one event per accepted transition from now on.
    /// Dropped receivers are pruned on the next send.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Places the human's mark at `(row, col)` and, if the game goes on,
    /// answers with the computer's move.
    ///
    /// Returns the phase after both placements.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] once the game is finished
    /// - [`MoveError::NotYourTurn`] if the computer is to move
    /// - [`MoveError::InvalidMove`] for out-of-range or occupied cells
    ///
    /// The board is unchanged on every error.
    #[instrument(skip(self), fields(human = %self.seating.human))]
    pub fn submit_human_move(&mut self, row: usize, col: usize) -> Result<GamePhase, MoveError> {
        let human = self.seating.human;
        match self.phase {
            GamePhase::Finished(outcome) => {
                warn!(%outcome, "Rejected move after game over");
                return Err(MoveError::GameOver);
            }
            GamePhase::AwaitingMove(side) if side != human => {
                warn!(expected = %side, "Rejected move out of turn");
                return Err(MoveError::NotYourTurn { expected: side });
            }
            GamePhase::AwaitingMove(_) => {}
        }

        let position = self
            .board
            .place(row, col, human)
            .inspect_err(|e| warn!(error = %e, "Rejected move"))?;
        info!(%position, "Human moved");
        self.record(Move::new(human, position));

        if !self.phase.is_finished() {
            self.computer_turn()?;
        }
        Ok(self.phase)
    }

    /// Clears the board and starts a new round.
    ///
    /// Always succeeds. When the computer opens, its first mark is placed
    /// before this returns.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.reset();
        self.history.clear();
        self.phase = GamePhase::AwaitingMove(self.seating.opening_side());
        info!(opener = ?self.seating.opener, "New round");
        self.emit(GameEvent::RoundStarted(self.current_state()));

        if self.seating.opener == Participant::Computer
            && let Err(e) = self.computer_turn()
        {
            // Unreachable: an empty board always has a legal move.
            error!(error = %e, "Computer failed to open the round");
        }
    }

    /// Plays the computer's move on the owned board.
    fn computer_turn(&mut self) -> Result<(), SearchError> {
        let computer = self.seating.computer();
        debug_assert_eq!(self.phase, GamePhase::AwaitingMove(computer));

        let position = best_move(&mut self.board, computer, self.seating.human)?;
        self.board
            .place_at(position, computer)
            .map_err(|_| SearchError::NoLegalMove)?;
        info!(%position, "Computer moved");
        self.record(Move::new(computer, position));
        Ok(())
    }

    /// Records an applied move, advances the phase and notifies subscribers.
    fn record(&mut self, mv: Move) {
        self.history.push(mv);
        self.phase = match classify(&self.board) {
            Outcome::InProgress => GamePhase::AwaitingMove(mv.side.opponent()),
            outcome => {
                info!(%outcome, "Game finished");
                GamePhase::Finished(outcome)
            }
        };
        debug!(%mv, phase = ?self.phase, "Transition");

        if cfg!(debug_assertions) {
            self.verify_invariants();
        }

        let snapshot = self.current_state();
        self.emit(GameEvent::MovePlayed { mv, snapshot });
    }

    fn verify_invariants(&self) {
        let record = GameRecord {
            board: &self.board,
            history: &self.history,
            opener: self.seating.opening_side(),
        };
        if let Err(violations) = check_all(&record) {
            for violation in &violations {
                warn!(invariant = %violation.description, "Invariant violated");
            }
            debug_assert!(violations.is_empty(), "game invariants violated");
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardError, Cell, Position};

    #[test]
    fn test_initial_state() {
        let game = Coordinator::new(Seating::default());
        let state = game.current_state();
        assert_eq!(state.board, Board::new());
        assert_eq!(state.phase, GamePhase::AwaitingMove(Side::First));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_human_move_is_answered() {
        let mut game = Coordinator::new(Seating::default());
        let phase = game.submit_human_move(0, 0).unwrap();

        assert_eq!(phase, GamePhase::AwaitingMove(Side::First));
        assert_eq!(game.board().count(Side::First), 1);
        assert_eq!(game.board().count(Side::Second), 1);
        assert_eq!(game.history()[0], Move::new(Side::First, Position::TopLeft));
    }

    #[test]
    fn test_rejected_move_leaves_board_unchanged() {
        let mut game = Coordinator::new(Seating::default());
        game.submit_human_move(1, 1).unwrap();
        let before = game.current_state();

        let err = game.submit_human_move(1, 1).unwrap_err();
        assert_eq!(
            err,
            MoveError::InvalidMove {
                source: BoardError::CellOccupied { row: 1, col: 1 }
            }
        );

        let err = game.submit_human_move(3, 1).unwrap_err();
        assert_eq!(
            err,
            MoveError::InvalidMove {
                source: BoardError::OutOfBounds { row: 3, col: 1 }
            }
        );
        assert_eq!(game.current_state(), before);
    }

    #[test]
    fn test_current_state_is_idempotent() {
        let mut game = Coordinator::new(Seating::default());
        game.submit_human_move(2, 2).unwrap();
        assert_eq!(game.current_state(), game.current_state());
    }

    #[test]
    fn test_computer_opens() {
        let seating = Seating {
            human: Side::Second,
            opener: Participant::Computer,
        };
        let game = Coordinator::new(seating);

        assert_eq!(game.phase(), GamePhase::AwaitingMove(Side::Second));
        assert_eq!(game.board().get(Position::TopLeft), Cell::Mark(Side::First));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_human_plays_second_side() {
        let seating = Seating {
            human: Side::Second,
            opener: Participant::Human,
        };
        let mut game = Coordinator::new(seating);
        assert_eq!(game.phase(), GamePhase::AwaitingMove(Side::Second));

        game.submit_human_move(1, 1).unwrap();
        assert_eq!(game.board().get(Position::Center), Cell::Mark(Side::Second));
        assert_eq!(game.board().count(Side::First), 1);
    }

    #[test]
    fn test_game_over_rejects_moves_until_reset() {
        let mut game = Coordinator::new(Seating::default());
        let mut phase = game.phase();
        while let Some(side) = phase.to_move() {
            assert_eq!(side, Side::First);
            let next = game.board().empty_cells().next().unwrap();
            phase = game.submit_human_move(next.row(), next.col()).unwrap();
        }
        assert_ne!(phase, GamePhase::Finished(Outcome::Win(Side::First)));

        let before = game.current_state();
        assert_eq!(game.submit_human_move(0, 0), Err(MoveError::GameOver));
        assert_eq!(game.current_state(), before);

        game.reset();
        assert_eq!(game.phase(), GamePhase::AwaitingMove(Side::First));
        assert_eq!(*game.board(), Board::new());
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_events_follow_transitions() {
        let mut game = Coordinator::new(Seating::default());
        let mut events = game.subscribe();

        game.submit_human_move(0, 0).unwrap();
        let first = events.try_recv().unwrap();
        let second = events.try_recv().unwrap();
        assert!(events.try_recv().is_err());

        match first {
            GameEvent::MovePlayed { mv, ref snapshot } => {
                assert_eq!(mv, Move::new(Side::First, Position::TopLeft));
                assert_eq!(snapshot.phase, GamePhase::AwaitingMove(Side::Second));
                assert_eq!(snapshot.board.count(Side::Second), 0);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(*second.snapshot(), game.current_state());

        game.reset();
        assert!(matches!(
            events.try_recv().unwrap(),
            GameEvent::RoundStarted(_)
        ));
    }

    #[test]
    fn test_rejected_move_emits_nothing() {
        let mut game = Coordinator::new(Seating::default());
        let mut events = game.subscribe();
        assert!(game.submit_human_move(5, 5).is_err());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut game = Coordinator::new(Seating::default());
        drop(game.subscribe());
        let mut live = game.subscribe();

        game.submit_human_move(1, 1).unwrap();
        assert_eq!(game.subscribers.len(), 1);
        assert!(live.try_recv().is_ok());
    }
}
