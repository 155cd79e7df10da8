//! Pieces module - shape catalog and rotation
//!
//! Shapes are square occupancy matrices (2x2, 3x3 or 4x4). Rotation is a plain
//! 90° clockwise turn of the matrix inside its box: no kick offsets are tried,
//! a rotation that collides is simply discarded.

use arrayvec::ArrayVec;

use crate::collision::check_collision;
use crate::types::{ColorId, PieceKind, MAX_SHAPE_SIZE};
use crate::Board;

/// Offset of a single mino relative to the shape's top-left corner, as (x, y)
pub type MinoOffset = (i8, i8);

/// Occupied cells of a shape
pub type ShapeCells = ArrayVec<MinoOffset, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

type Matrix = [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

/// Spawn row for every piece
pub const SPAWN_Y: i8 = 0;

/// Immutable N×N occupancy matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: Matrix,
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// # Panics
    ///
    /// Panics unless `rows` is square with side 1..=4.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let size = rows.len();
        assert!(
            (1..=MAX_SHAPE_SIZE).contains(&size),
            "shape side {} out of range",
            size
        );
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "shape must be square");
            for (c, v) in row.iter().enumerate() {
                cells[r][c] = *v != 0;
            }
        }
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Side length of the bounding box
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size as usize && col < self.size as usize && self.cells[row][col]
    }

    /// Occupied cells as (x, y) offsets, row by row
    pub fn cells(&self) -> ShapeCells {
        let n = self.size as usize;
        let mut out = ShapeCells::new();
        for r in 0..n {
            for c in 0..n {
                if self.cells[r][c] {
                    out.push((c as i8, r as i8));
                }
            }
        }
        out
    }

    /// 90° clockwise rotation: `rotated[c][n-1-r] = cells[r][c]`
    pub fn rotate_cw(&self) -> Shape {
        let n = self.size as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for r in 0..n {
            for c in 0..n {
                cells[c][n - 1 - r] = self.cells[r][c];
            }
        }
        Shape {
            size: self.size,
            cells,
        }
    }
}

/// Get the spawn shape for a piece kind
pub fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[
            &[0, 0, 0, 0],
            &[1, 1, 1, 1],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]),
        PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
        PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
    }
}

/// Spawn column: the shape box centered on the board
pub fn spawn_x(board_width: u8, shape_size: u8) -> i8 {
    (board_width / 2) as i8 - (shape_size / 2) as i8
}

/// A shape placed on the board
///
/// `x`/`y` anchor the top-left corner of the shape's bounding box and may be
/// negative while the piece hangs above the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: ColorId,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece of `kind` at the spawn origin for a board `board_width` wide
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let shape = spawn_shape(kind);
        Self {
            kind,
            color: kind.color_id(),
            shape,
            x: spawn_x(board_width, shape.size()),
            y: SPAWN_Y,
        }
    }

    /// Absolute board coordinates of every occupied cell after an offset
    pub fn cells_at(&self, dx: i8, dy: i8) -> ShapeCells {
        self.shape
            .cells()
            .into_iter()
            .map(|(cx, cy)| (self.x + cx + dx, self.y + cy + dy))
            .collect()
    }
}

/// Rotate tentatively: returns the rotated shape only if it fits at the
/// piece's current origin.
pub fn try_rotate(board: &Board, piece: &Piece) -> Option<Shape> {
    let rotated = piece.shape.rotate_cw();
    if check_collision(board, piece, 0, 0, Some(&rotated)) {
        None
    } else {
        Some(rotated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(spawn_shape(PieceKind::I).size(), 4);
        assert_eq!(spawn_shape(PieceKind::O).size(), 2);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(spawn_shape(kind).size(), 3, "{:?}", kind);
        }
    }

    #[test]
    fn test_every_piece_has_four_minos() {
        for kind in PieceKind::ALL {
            assert_eq!(spawn_shape(kind).cells().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let t = spawn_shape(PieceKind::T);
        let east = Shape::from_rows(&[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]]);
        assert_eq!(t.rotate_cw(), east);
    }

    #[test]
    fn test_rotate_i_moves_bar_to_column_two() {
        let i = spawn_shape(PieceKind::I).rotate_cw();
        assert_eq!(i.cells().as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_rotate_o_is_identity() {
        let o = spawn_shape(PieceKind::O);
        assert_eq!(o.rotate_cw(), o);
    }

    #[test]
    fn test_spawn_origin_centered() {
        assert_eq!(Piece::spawn(PieceKind::I, 10).x, 3);
        assert_eq!(Piece::spawn(PieceKind::O, 10).x, 4);
        assert_eq!(Piece::spawn(PieceKind::T, 10).x, 4);
        assert_eq!(Piece::spawn(PieceKind::T, 10).y, SPAWN_Y);
    }

    #[test]
    fn test_piece_carries_color_of_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(Piece::spawn(kind, 10).color, kind.color_id());
        }
    }
}
