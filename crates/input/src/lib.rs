//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s plus the
//! host-level controls (volume, mute, quit) and the name-entry prompt keys.
//! There is no auto-repeat handling here: every key press is one command.

pub mod map;

pub use blockfall_types as types;

pub use map::{is_interrupt, map_key, map_name_entry_key, should_quit, Control, NameKey};
