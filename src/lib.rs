//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under short names and hosts the pieces that
//! sit above the engine: configuration, music and the application wiring used
//! by the terminal binary.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod app;
pub mod audio;
pub mod config;

pub use app::{App, NameEntry};
pub use audio::{open_output, MusicBackend, MusicDeck, RodioBackend};
pub use config::Config;
