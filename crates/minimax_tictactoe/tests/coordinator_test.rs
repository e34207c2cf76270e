//! Tests for the turn coordinator.

use minimax_tictactoe::{
    Board, Coordinator, GameEvent, GamePhase, MoveError, Outcome, Participant, Seating, Side,
    classify,
};

#[test]
fn test_full_board_without_line_is_draw() {
    let board: Board = "XOX XOO OXX".parse().expect("Parse failed");
    assert_eq!(classify(&board), Outcome::Draw);
}

#[test]
fn test_occupied_cell_is_rejected() {
    let mut game = Coordinator::new(Seating::default());
    game.submit_human_move(0, 0).expect("Move failed");
    let before = game.current_state();

    let err = game.submit_human_move(0, 0).expect_err("Move should fail");
    assert!(matches!(err, MoveError::InvalidMove { .. }));
    assert_eq!(game.current_state(), before);
}

#[test]
fn test_game_over_then_reset() {
    let mut game = Coordinator::new(Seating::default());

    // Human X always takes the first free cell.
    let mut phase = game.phase();
    while !phase.is_finished() {
        let pos = game
            .board()
            .empty_cells()
            .next()
            .expect("Unfinished game has an empty cell");
        phase = game
            .submit_human_move(pos.row(), pos.col())
            .expect("Move failed");
    }
    assert!(matches!(
        phase,
        GamePhase::Finished(Outcome::Win(Side::Second) | Outcome::Draw)
    ));

    assert_eq!(game.submit_human_move(2, 2), Err(MoveError::GameOver));

    game.reset();
    let state = game.current_state();
    assert_eq!(state.phase, GamePhase::AwaitingMove(Side::First));
    assert_eq!(state.board.empty_cells().count(), 9);
    assert_eq!(classify(&state.board), Outcome::InProgress);
}

#[test]
fn test_notifications_mirror_state() {
    let mut game = Coordinator::new(Seating::default());
    let mut events = game.subscribe();

    game.submit_human_move(1, 1).expect("Move failed");

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    assert_eq!(received.len(), 2);
    assert_eq!(*received[1].snapshot(), game.current_state());
    assert!(
        received
            .iter()
            .all(|event| matches!(event, GameEvent::MovePlayed { .. }))
    );
}

#[test]
fn test_computer_opening_survives_reset() {
    let seating = Seating {
        human: Side::Second,
        opener: Participant::Computer,
    };
    let mut game = Coordinator::new(seating);
    let mut events = game.subscribe();

    game.submit_human_move(1, 1).expect("Move failed");
    game.reset();

    assert_eq!(game.phase(), GamePhase::AwaitingMove(Side::Second));
    assert_eq!(game.board().count(Side::First), 1);
    assert_eq!(game.history().len(), 1);

    let kinds: Vec<bool> = std::iter::from_fn(|| events.try_recv().ok())
        .map(|event| matches!(event, GameEvent::RoundStarted(_)))
        .collect();
    // Two moves, then the reset followed by the computer's opening.
    assert_eq!(kinds, vec![false, false, true, false]);
}
