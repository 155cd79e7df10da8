//! Collision and placement
//!
//! Cells above the board (negative row) only ever collide with the side
//! walls. This lets a piece spawn or rotate while partly off-screen.

use crate::pieces::{Piece, Shape};
use crate::Board;

/// Would `piece`, shifted by (dx, dy) and optionally using `shape` instead of
/// its own, overlap a wall, the floor or a filled cell?
pub fn check_collision(
    board: &Board,
    piece: &Piece,
    dx: i8,
    dy: i8,
    shape: Option<&Shape>,
) -> bool {
    let shape = shape.unwrap_or(&piece.shape);
    let width = board.width() as i8;
    let height = board.height() as i8;

    shape.cells().iter().any(|&(cx, cy)| {
        let x = piece.x + cx + dx;
        let y = piece.y + cy + dy;
        if x < 0 || x >= width || y >= height {
            return true;
        }
        y >= 0 && board.is_occupied(x, y)
    })
}

/// Write the piece's visible cells into the board.
///
/// Cells with a negative row are dropped. Returns the number of cells written.
pub fn freeze(board: &mut Board, piece: &Piece) -> usize {
    let mut written = 0;
    for (x, y) in piece.cells_at(0, 0) {
        if y < 0 {
            continue;
        }
        board.set(x, y, piece.color);
        written += 1;
    }
    written
}
