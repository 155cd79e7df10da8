//! Pieces tests - catalog, rotation and spawn legality

use blockfall::core::pieces::{spawn_shape, spawn_x, try_rotate, Piece, Shape, SPAWN_Y};
use blockfall::core::{check_collision, Board};
use blockfall::types::PieceKind;

// ============== Catalog ==============

#[test]
fn test_i_piece_bar_on_second_row() {
    let i = spawn_shape(PieceKind::I);
    assert_eq!(i.size(), 4);
    assert_eq!(i.cells().as_slice(), &[(0, 1), (1, 1), (2, 1), (3, 1)]);
}

#[test]
fn test_three_wide_pieces_use_top_two_rows() {
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
        let shape = spawn_shape(kind);
        assert!(
            shape.cells().iter().all(|&(_, y)| y < 2),
            "{:?} uses the bottom row",
            kind
        );
    }
}

#[test]
fn test_color_ids_follow_catalog_order() {
    let ids: Vec<u8> = PieceKind::ALL.iter().map(|k| k.color_id().get()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
}

// ============== Rotation ==============

#[test]
fn test_rotation_preserves_mino_count() {
    for kind in PieceKind::ALL {
        let mut shape = spawn_shape(kind);
        for _ in 0..4 {
            shape = shape.rotate_cw();
            assert_eq!(shape.cells().len(), 4);
        }
    }
}

#[test]
fn test_rotate_l_clockwise() {
    let l = spawn_shape(PieceKind::L);
    let east = Shape::from_rows(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]]);
    assert_eq!(l.rotate_cw(), east);
}

#[test]
fn test_rotation_keeps_color() {
    let board = Board::new(10, 20);
    let mut piece = Piece::spawn(PieceKind::Z, 10);
    piece.y = 5;
    let rotated = try_rotate(&board, &piece).expect("open board");
    piece.shape = rotated;
    assert_eq!(piece.color, PieceKind::Z.color_id());
}

#[test]
fn test_rotation_blocked_against_wall() {
    let board = Board::new(10, 20);
    // A vertical I hugging the left wall cannot turn back to horizontal.
    let mut piece = Piece::spawn(PieceKind::I, 10);
    piece.shape = piece.shape.rotate_cw();
    piece.x = -2;
    piece.y = 5;
    assert!(!check_collision(&board, &piece, 0, 0, None));
    assert_eq!(try_rotate(&board, &piece), None);
}

#[test]
fn test_rotation_blocked_by_stack() {
    let mut board = Board::new(10, 20);
    let mut piece = Piece::spawn(PieceKind::T, 10);
    piece.y = 10;
    // The clockwise T needs (x+1, y+2).
    board.set(piece.x + 1, piece.y + 2, PieceKind::O.color_id());
    assert_eq!(try_rotate(&board, &piece), None);
}

// ============== Spawn ==============

#[test]
fn test_fresh_spawn_never_collides_on_empty_board() {
    for (cols, rows) in [(10, 20), (4, 4), (7, 9), (64, 64)] {
        let board = Board::new(cols, rows);
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, cols);
            assert_eq!(piece.y, SPAWN_Y);
            assert!(
                !check_collision(&board, &piece, 0, 0, None),
                "{:?} collides on {}x{}",
                kind,
                cols,
                rows
            );
        }
    }
}

#[test]
fn test_spawn_column_formula() {
    assert_eq!(spawn_x(10, 4), 3);
    assert_eq!(spawn_x(10, 3), 4);
    assert_eq!(spawn_x(10, 2), 4);
    assert_eq!(spawn_x(7, 3), 2);
    assert_eq!(spawn_x(4, 4), 0);
}
