//! Session state machine scenarios driven entirely by virtual time

use blockfall::core::pieces::Piece;
use blockfall::core::{check_collision, Session, SessionConfig, SessionEvent};
use blockfall::types::{GameAction, Phase, PieceKind};

fn started(seed: u32) -> Session {
    let mut session = Session::new(SessionConfig {
        seed,
        ..SessionConfig::default()
    });
    session.start();
    session.drain_events().for_each(drop);
    session
}

fn vertical_i() -> Piece {
    let mut piece = Piece::spawn(PieceKind::I, 10);
    piece.shape = piece.shape.rotate_cw();
    piece
}

#[test]
fn test_soft_drop_into_gap_clears_one_row_for_100() {
    let mut session = started(3);
    // Bottom row full except column 5.
    for x in (0..10).filter(|&x| x != 5) {
        session.board_mut().set(x, 19, PieceKind::O.color_id());
    }
    // A vertical I occupies column 3 + 2 = 5.
    session.force_active(vertical_i());

    while session.can_move(0, 1) {
        assert!(session.soft_drop());
    }
    let before = session.score();
    assert_eq!(before, 16, "one point per legal step");

    assert!(session.soft_drop());
    assert_eq!(session.score() - before, 100);
    assert_eq!(session.lines(), 1);
    // Three cells of the I remain, shifted down by one row.
    assert_eq!(session.board().filled_count(), 3);
    assert!(session.board().is_occupied(5, 19));
    assert!(!session.board().is_occupied(5, 16));

    let cleared: Vec<_> = session
        .drain_events()
        .filter(|e| matches!(e, SessionEvent::LinesCleared { .. }))
        .collect();
    assert_eq!(
        cleared,
        vec![SessionEvent::LinesCleared {
            rows: 1,
            points: 100
        }]
    );
}

#[test]
fn test_gravity_lock_clears_without_drop_point() {
    let mut session = started(3);
    for x in (0..10).filter(|&x| x != 5) {
        session.board_mut().set(x, 19, PieceKind::O.color_id());
    }
    session.force_active(vertical_i());

    // 16 descents plus one blocked tick.
    session.advance(17_000);
    assert_eq!(session.score(), 100);
}

#[test]
fn test_double_clear_scores_400() {
    let mut session = started(5);
    for y in [18, 19] {
        for x in (0..10).filter(|&x| x != 5) {
            session.board_mut().set(x, y, PieceKind::J.color_id());
        }
    }
    let mut piece = vertical_i();
    piece.y = 16;
    session.force_active(piece);

    assert!(session.tick());
    assert_eq!(session.score(), 400);
    assert_eq!(session.board().filled_count(), 2);
}

#[test]
fn test_spawned_piece_is_legal_for_every_seed() {
    for seed in 0..50 {
        let session = started(seed);
        let piece = session.active().expect("active piece");
        assert!(!check_collision(session.board(), &piece, 0, 0, None));
    }
}

#[test]
fn test_pause_freezes_board_and_clock() {
    let mut session = started(9);
    session.advance(2500);
    let piece = session.active();
    let board = session.board().clone();
    let secs = session.elapsed_secs();
    assert_eq!(secs, 2);

    assert!(session.apply_action(GameAction::Pause));
    assert_eq!(session.advance(10_000), 0);
    assert_eq!(session.active(), piece);
    assert_eq!(session.board(), &board);
    assert_eq!(session.elapsed_secs(), secs);

    // Commands are ignored while paused.
    assert!(!session.apply_action(GameAction::MoveLeft));
    assert!(!session.apply_action(GameAction::SoftDrop));
    assert!(!session.apply_action(GameAction::Rotate));
    assert_eq!(session.active(), piece);

    // Resume keeps the 500ms of progress made before the pause.
    assert!(session.apply_action(GameAction::Pause));
    assert_eq!(session.advance(499), 0);
    assert_eq!(session.advance(1), 1);
    assert_eq!(session.elapsed_secs(), 3);
}

#[test]
fn test_stacking_until_game_over() {
    let mut session = started(11);
    let mut guard = 0;
    while session.phase() == Phase::Running {
        session.soft_drop();
        guard += 1;
        assert!(guard < 10_000, "game never ended");
    }

    assert_eq!(session.phase(), Phase::GameOver);
    assert!(!session.timers().is_armed());
    let overs = session
        .drain_events()
        .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
        .count();
    assert_eq!(overs, 1);

    // Nothing moves after the end.
    let board = session.board().clone();
    assert_eq!(session.advance(60_000), 0);
    assert!(!session.soft_drop());
    assert_eq!(session.board(), &board);
    assert_eq!(session.drain_events().count(), 0);
}

/// Row 1 filled except the last column and an O resting above it, so the
/// next gravity step freezes the O and the following spawn is blocked.
fn about_to_top_out(seed: u32) -> Session {
    let mut session = started(seed);
    for x in 0..9 {
        session.board_mut().set(x, 1, PieceKind::S.color_id());
    }
    let mut piece = Piece::spawn(PieceKind::O, 10);
    piece.y = -1;
    session.force_active(piece);
    session
}

#[test]
fn test_clock_stops_when_game_ends_mid_advance() {
    let mut session = about_to_top_out(4);

    assert_eq!(session.advance(10_000), 1);
    assert!(session.is_over());
    assert_eq!(session.elapsed_secs(), 1);
    assert_eq!(session.timers().running_ms(), 1000);
    assert!(!session.timers().clock().is_armed());

    // Further time is ignored entirely.
    session.advance(5_000);
    assert_eq!(session.elapsed_secs(), 1);
    assert_eq!(session.timers().running_ms(), 1000);
}

#[test]
fn test_clock_counts_partial_progress_before_game_over() {
    let mut session = about_to_top_out(6);
    session.advance(2_500);
    // The first gravity step lands at 1000ms of the batch.
    assert!(session.is_over());
    assert_eq!(session.timers().running_ms(), 1000);

    let mut session = about_to_top_out(6);
    session.advance(600);
    assert!(!session.is_over());
    assert_eq!(session.advance(400), 1);
    assert!(session.is_over());
    assert_eq!(session.timers().running_ms(), 1000);
    assert_eq!(session.elapsed_secs(), 1);
}

#[test]
fn test_restart_from_game_over() {
    let mut session = started(11);
    while session.phase() == Phase::Running {
        session.soft_drop();
    }
    assert!(session.apply_action(GameAction::Restart));
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.score(), 0);
    assert_eq!(session.board().filled_count(), 0);
    assert_eq!(session.games_played(), 2);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = started(42);
    let mut b = started(42);
    for _ in 0..200 {
        a.soft_drop();
        b.soft_drop();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_small_board_plays() {
    let mut session = Session::new(SessionConfig {
        cols: 4,
        rows: 4,
        seed: 1,
        ..SessionConfig::default()
    });
    session.start();
    for _ in 0..200 {
        session.advance(250);
        session.move_left();
    }
    let snap = session.snapshot();
    assert_eq!((snap.cols, snap.rows), (4, 4));
    assert_eq!(snap.board.len(), 16);
}
