use crate::pieces::{spawn_shape, Piece, Shape};
use crate::types::{ColorId, Phase, PieceKind, DEFAULT_COLS, DEFAULT_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: ColorId,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of a session for render sinks
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub cols: u8,
    pub rows: u8,
    /// Color ids, row-major, 0 = empty
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub next_shape: Shape,
    pub score: u32,
    pub lines: u32,
    pub elapsed_secs: u64,
    pub phase: Phase,
    pub games_played: u32,
}

impl GameSnapshot {
    /// Color id at (x, y), 0 when empty or out of range
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        if x >= self.cols as usize || y >= self.rows as usize {
            return 0;
        }
        self.board[y * self.cols as usize + x]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            board: vec![0; DEFAULT_COLS as usize * DEFAULT_ROWS as usize],
            active: None,
            next: PieceKind::I,
            next_shape: spawn_shape(PieceKind::I),
            score: 0,
            lines: 0,
            elapsed_secs: 0,
            phase: Phase::Idle,
            games_played: 0,
        }
    }
}
