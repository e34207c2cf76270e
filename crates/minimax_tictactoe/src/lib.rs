//! Minimax tic-tac-toe engine.
//!
//! A human plays against a computer opponent that searches the full game
//! tree and therefore never loses.
//!
//! # Architecture
//!
//! - **Board**: the 3x3 grid and its legality checks
//! - **Rules**: outcome detection (win lines, full board)
//! - **Search**: exhaustive minimax picking the computer's move
//! - **Coordinator**: the turn state machine the presentation layer drives
//!
//! # Example
//!
//! ```
//! use minimax_tictactoe::{Coordinator, GamePhase, Seating, Side};
//!
//! let mut game = Coordinator::new(Seating::default());
//! let mut events = game.subscribe();
//!
//! // Human (X) takes the center, the computer answers immediately.
//! let phase = game.submit_human_move(1, 1)?;
//! assert_eq!(phase, GamePhase::AwaitingMove(Side::First));
//! assert_eq!(game.history().len(), 2);
//!
//! // One notification for each placed mark.
//! assert!(events.try_recv().is_ok());
//! assert!(events.try_recv().is_ok());
//! # Ok::<(), minimax_tictactoe::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod coordinator;
mod error;
mod invariants;
mod phases;
mod position;
mod search;
mod types;

pub mod rules;

pub use action::Move;
pub use coordinator::{Coordinator, GameEvent, Participant, Seating, Snapshot};
pub use error::{BoardError, MoveError, SearchError};
pub use invariants::{
    AlternatingTurnInvariant, GameRecord, Invariant, InvariantViolation, MonotonicBoardInvariant,
    check_all,
};
pub use phases::{GamePhase, Outcome};
pub use position::Position;
pub use rules::classify;
pub use search::{LOSS_SCORE, WIN_SCORE, best_move, score_moves};
pub use types::{Board, Cell, Side};
