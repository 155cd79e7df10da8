//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, session state machine and the small
//! amount of persisted state around them. Nothing here touches the terminal;
//! time only moves when the host calls [`Session::advance`].
//!
//! # Module Structure
//!
//! - [`board`]: configurable grid with row detection and compaction
//! - [`pieces`]: the seven shapes, clockwise rotation, spawn placement
//! - [`collision`]: legality checks and freezing a piece into the board
//! - [`scoring`]: line clear and soft drop points
//! - [`timer`]: cancellable descent and clock cadences
//! - [`session`]: the state machine tying it all together
//! - [`snapshot`]: read-only session views for renderers
//! - [`rng`]: seedable uniform piece selection
//! - [`storage`]: key-value persistence port
//! - [`leaderboard`]: top-ten high scores
//! - [`prefs`]: audio preferences
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Session, SessionConfig};
//! use blockfall_core::types::{GameAction, Phase};
//!
//! let mut session = Session::new(SessionConfig::default());
//! session.start();
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::SoftDrop);
//! assert_eq!(session.score(), 1);
//!
//! // Gravity runs off virtual time.
//! session.advance(3000);
//! assert_eq!(session.phase(), Phase::Running);
//! ```

pub mod board;
pub mod collision;
pub mod leaderboard;
pub mod pieces;
pub mod prefs;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod storage;
pub mod timer;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{check_collision, freeze};
pub use leaderboard::{sanitize_name, HighScores, Leaderboard, LeaderboardEntry};
pub use pieces::{spawn_shape, try_rotate, Piece, Shape};
pub use prefs::AudioPrefs;
pub use rng::{PieceRng, SimpleRng};
pub use scoring::{line_clear_points, soft_drop_points};
pub use session::{Session, SessionConfig, SessionEvent};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use timer::{format_elapsed, Cadence, Timers};
