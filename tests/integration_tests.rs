//! Integration tests for the game rules

use blockfall::core::{Game, GameSnapshot, PieceSource, ScriptedSource, ShapeExt};
use blockfall::types::{BlockColor, GameAction, ShapeKind, DEFAULT_HEIGHT, DEFAULT_WIDTH};

fn scripted(width: i32, height: i32, shapes: &[ShapeKind]) -> Game<ScriptedSource> {
    let source = ScriptedSource::new(shapes.to_vec()).unwrap();
    Game::with_source(width, height, source).unwrap()
}

#[test]
fn test_game_lifecycle() {
    let game = Game::seeded(DEFAULT_WIDTH, DEFAULT_HEIGHT, 12345).unwrap();

    assert!(!game.has_lost());
    assert_eq!(game.rows_completed(), 0);
    assert_eq!(game.pieces_locked(), 0);
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(game.current_piece_x(), DEFAULT_WIDTH / 2);
}

#[test]
fn test_new_game_from_os_rng_is_playable() {
    let game = Game::new(DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap();
    assert!(!game.has_lost());
    assert!(ShapeKind::ALL.contains(&game.current_shape()));
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Game::seeded(10, 24, 99).unwrap();
    let mut b = Game::seeded(10, 24, 99).unwrap();

    for _ in 0..30 {
        assert_eq!(a.current_shape(), b.current_shape());
        a.drop_current_piece();
        b.drop_current_piece();
    }
    assert_eq!(a.board(), b.board());
}

#[test]
fn test_spawn_for_every_shape() {
    for kind in ShapeKind::ALL {
        let game = scripted(10, 24, &[kind]);
        let piece = kind.piece();

        assert_eq!(game.current_piece_x(), 5);
        assert_eq!(game.current_piece_y(), 24 - piece.max_y() - 1);
        assert_eq!(game.current_piece_color(), kind.color());
        assert!(game.current_piece().equals(&piece));
        // On an empty board every fresh piece falls to the floor.
        assert_eq!(game.current_piece_drop_y(), -piece.min_y(), "{:?}", kind);
    }
}

#[test]
fn test_queries_are_idempotent() {
    let mut game = scripted(10, 24, &[ShapeKind::T, ShapeKind::L, ShapeKind::I]);
    game.drop_current_piece();
    game.move_left();

    let first = (
        game.current_piece_x(),
        game.current_piece_y(),
        game.current_piece_drop_y(),
        game.has_lost(),
        game.rows_completed(),
    );
    let second = (
        game.current_piece_x(),
        game.current_piece_y(),
        game.current_piece_drop_y(),
        game.has_lost(),
        game.rows_completed(),
    );
    assert_eq!(first, second);
}

#[test]
fn test_refused_commands_change_nothing() {
    let mut game = scripted(10, 24, &[ShapeKind::O]);
    while game.move_left() {}

    let before = *game.current();
    let drop_y = game.current_piece_drop_y();
    assert!(!game.move_left());
    assert_eq!(*game.current(), before);
    assert_eq!(game.current_piece_drop_y(), drop_y);
}

#[test]
fn test_move_down_keeps_drop_preview() {
    let mut game = scripted(10, 24, &[ShapeKind::Z]);
    let drop_y = game.current_piece_drop_y();
    for _ in 0..5 {
        assert!(!game.move_down());
        assert_eq!(game.current_piece_drop_y(), drop_y);
    }
}

#[test]
fn test_drop_preview_follows_rotation() {
    let mut game = scripted(10, 24, &[ShapeKind::I]);
    // Horizontal I rests with its cells on row 0.
    assert_eq!(game.current_piece_drop_y(), -1);
    assert!(game.rotate_current_piece());
    // Vertical I reaches down to y - 1.
    assert_eq!(game.current_piece_drop_y(), 1);
}

#[test]
fn test_fill_bottom_row_with_i_pieces() {
    // Two horizontal I pieces fill row 0 of an 8-wide board.
    let mut game = scripted(8, 10, &[ShapeKind::I, ShapeKind::I, ShapeKind::O, ShapeKind::O]);

    // I spans x - 2..=x + 1: push it against the left wall, then the right.
    while game.move_left() {}
    assert_eq!(game.current_piece_x(), 2);
    assert_eq!(game.drop_current_piece(), 0);

    while game.move_right() {}
    assert_eq!(game.current_piece_x(), 6);
    assert_eq!(game.drop_current_piece(), 1);
    assert_eq!(game.rows_completed(), 1);
    assert_eq!(game.board().filled_count(), 0);

    assert_eq!(game.current_shape(), ShapeKind::O);
    assert_eq!(game.last_lock().unwrap().rows_cleared, 1);
}

#[test]
fn test_rows_accumulate_over_locks() {
    let mut game = scripted(4, 8, &[ShapeKind::O]);
    for _ in 0..3 {
        assert!(game.move_left());
        assert_eq!(game.drop_current_piece(), 0);
        assert!(game.move_right());
        assert_eq!(game.drop_current_piece(), 2);
    }
    assert_eq!(game.rows_completed(), 6);
    assert_eq!(game.pieces_locked(), 6);
    assert!(!game.has_lost());
}

#[test]
fn test_game_over_when_spawn_is_blocked() {
    let mut game = scripted(10, 6, &[ShapeKind::O]);
    let mut locks = 0;
    while !game.has_lost() {
        game.drop_current_piece();
        locks += 1;
        assert!(locks < 10, "stack should reach the spawn row quickly");
    }

    // O stacks two rows at a time in the same columns: 0..=1, 2..=3, 4..=5.
    assert_eq!(locks, 3);
    assert_eq!(game.board().column_height(4), 6);
    assert_eq!(game.board().column_height(5), 6);

    let snap = game.snapshot();
    assert!(snap.lost);
    assert!(!game.move_down());
    assert!(!game.apply_action(GameAction::Rotate));
}

#[test]
fn test_wall_kick_keeps_piece_inside() {
    for kind in ShapeKind::ALL {
        let mut game = scripted(10, 24, &[kind]);
        while game.move_right() {}
        for _ in 0..4 {
            if game.rotate_current_piece() {
                let p = game.current_piece();
                assert!(p.max_x() + game.current_piece_x() < 10, "{:?}", kind);
                assert!(p.min_x() + game.current_piece_x() >= 0, "{:?}", kind);
            }
        }
    }
}

#[test]
fn test_closure_source() {
    let mut flip = false;
    let source = move || {
        flip = !flip;
        if flip {
            ShapeKind::S
        } else {
            ShapeKind::Z
        }
    };
    let mut game = Game::with_source(10, 24, source).unwrap();
    assert_eq!(game.current_shape(), ShapeKind::S);
    game.drop_current_piece();
    assert_eq!(game.current_shape(), ShapeKind::Z);
    game.drop_current_piece();
    assert_eq!(game.current_shape(), ShapeKind::S);
}

#[test]
fn test_scripted_source_wraps() {
    let mut source = ScriptedSource::new([ShapeKind::T, ShapeKind::O]).unwrap();
    assert_eq!(source.next_shape(), ShapeKind::T);
    assert_eq!(source.next_shape(), ShapeKind::O);
    assert_eq!(source.next_shape(), ShapeKind::T);
    assert!(ScriptedSource::new(Vec::<ShapeKind>::new()).is_none());
}

#[test]
fn test_snapshot_into_reuses_buffer() {
    let mut game = scripted(10, 24, &[ShapeKind::T, ShapeKind::J]);
    let mut snap = GameSnapshot::default();

    game.snapshot_into(&mut snap);
    assert_eq!(snap.board.len(), 240);
    assert!(snap.playable());

    game.drop_current_piece();
    game.snapshot_into(&mut snap);
    assert_eq!(snap.board.len(), 240);
    assert_eq!(snap.block(5, 0), Some(BlockColor::Purple));
    assert_eq!(snap.active.unwrap().kind, ShapeKind::J);
    assert_eq!(snap.pieces_locked, 1);
}
