//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine, terminal rendering, persistence).
//!
//! # Board Dimensions
//!
//! The playfield size is engine configuration, not a rendering unit:
//!
//! - **Default width**: 10 columns (indexed 0-9)
//! - **Default height**: 20 rows (indexed 0-19)
//! - **Accepted range**: 4..=64 in both directions
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DROP_INTERVAL_MS` | 1000 | Gravity cadence (one row per fire) |
//! | `CLOCK_INTERVAL_MS` | 1000 | Elapsed-time display cadence |
//!
//! # Scoring
//!
//! | Event | Points |
//! |-------|--------|
//! | Clear `n` rows in one freeze | `100 * n * n` |
//! | Legal soft-drop step | 1 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.color_id().get(), 6);
//! assert_eq!(piece.color_id().rgb(), (0x7D, 0x5A, 0x5A));
//!
//! assert_eq!(DEFAULT_COLS, 10);
//! assert_eq!(DEFAULT_ROWS, 20);
//! ```

/// Default board width in cells (10 columns)
pub const DEFAULT_COLS: u8 = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_ROWS: u8 = 20;

/// Smallest accepted board dimension
pub const MIN_BOARD_DIM: u8 = 4;

/// Largest accepted board dimension
pub const MAX_BOARD_DIM: u8 = 64;

/// Largest shape matrix side (the I piece is 4x4)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Gravity interval (1000ms = 1 second per row)
pub const DROP_INTERVAL_MS: u32 = 1000;

/// Elapsed-time display refresh interval
pub const CLOCK_INTERVAL_MS: u32 = 1000;

/// Base points for a line clear, multiplied by the square of the row count
pub const LINE_CLEAR_BASE: u32 = 100;

/// Points for one legal manual soft-drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Number of entries kept on the leaderboard
pub const LEADERBOARD_CAPACITY: usize = 10;

/// Maximum player name length in characters
pub const MAX_NAME_CHARS: usize = 15;

/// Name stored when the player submits a blank name
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Music volume used when no preference has been saved
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Volume change per HUD key press
pub const VOLUME_STEP: f32 = 0.1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_defaults() {
        assert_eq!(DROP_INTERVAL_MS, 1000);
        assert_eq!(CLOCK_INTERVAL_MS, 1000);
        assert_eq!(LEADERBOARD_CAPACITY, 10);
        assert_eq!(MAX_NAME_CHARS, 15);
        assert_eq!(DEFAULT_PLAYER_NAME, "Anonymous");
        assert!(MIN_BOARD_DIM as usize >= MAX_SHAPE_SIZE);
    }

    #[test]
    fn color_ids_follow_catalog_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.color_id().get() as usize, i + 1);
        }
        assert_eq!(ColorId::new(0), None);
        assert_eq!(ColorId::new(8), None);
    }

    #[test]
    fn palette_matches_reference_hex() {
        assert_eq!(ColorId::new(1).unwrap().rgb(), (0xF8, 0xE7, 0xD5));
        assert_eq!(ColorId::new(7).unwrap().rgb(), (0xA0, 0x52, 0x44));
    }

    #[test]
    fn phase_running_only_for_running() {
        assert!(Phase::Running.is_running());
        assert!(!Phase::Paused.is_running());
        assert!(!Phase::Idle.is_running());
        assert!(!Phase::GameOver.is_running());
    }
}

/// The seven piece kinds, in catalog order
///
/// Each kind owns a fixed color id (its 1-based catalog position):
/// - **I**: 1, horizontal bar in a 4x4 box
/// - **J**: 2
/// - **L**: 3
/// - **O**: 4, 2x2 square
/// - **S**: 5
/// - **T**: 6
/// - **Z**: 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Color identity carried by every piece of this kind
    pub fn color_id(&self) -> ColorId {
        ColorId(self.index() as u8 + 1)
    }
}

/// One of the seven non-empty palette entries (1..=7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(u8);

/// Palette RGB values indexed by `color id - 1`
pub const PALETTE: [(u8, u8, u8); 7] = [
    (0xF8, 0xE7, 0xD5),
    (0x5A, 0x4E, 0x42),
    (0xD6, 0x7A, 0x4F),
    (0xC0, 0x98, 0x5A),
    (0x82, 0x91, 0x77),
    (0x7D, 0x5A, 0x5A),
    (0xA0, 0x52, 0x44),
];

impl ColorId {
    /// Returns `None` for 0 (the empty marker) and anything past the palette
    pub fn new(id: u8) -> Option<Self> {
        if (1..=PALETTE.len() as u8).contains(&id) {
            Some(Self(id))
        } else {
            None
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        PALETTE[(self.0 - 1) as usize]
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(ColorId)`: Cell filled by a frozen piece of that color
pub type Cell = Option<ColorId>;

/// Commands the engine accepts from a controller
///
/// Every command is validated against the session phase; commands that do not
/// apply are ignored without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (scores a point when the step is legal)
    SoftDrop,
    /// Rotate piece 90° clockwise, discarded if it collides
    Rotate,
    /// Toggle pause state
    Pause,
    /// Start a new game from any state
    Restart,
}

/// Session lifecycle
///
/// `Idle -> Running <-> Paused`, `Running -> GameOver`. `Restart` re-enters
/// `Running` from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No game started yet
    #[default]
    Idle,
    Running,
    Paused,
    /// Terminal until the next restart
    GameOver,
}

impl Phase {
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running)
    }
}
