//! Runtime configuration read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BLOCKFALL_COLS` | 10 |
//! | `BLOCKFALL_ROWS` | 20 |
//! | `BLOCKFALL_DROP_MS` | 1000 |
//! | `BLOCKFALL_SEED` | derived from the clock |
//! | `BLOCKFALL_DATA_DIR` | `$HOME/.local/share/blockfall`, else `./.blockfall` |
//! | `BLOCKFALL_LOG_FILE` | `<data dir>/blockfall.log` |
//! | `BLOCKFALL_MUSIC` | on; `0`, `off` or `false` disables the output device |
//!
//! Unparsable values fall back to the defaults.

use std::path::PathBuf;

use crate::core::SessionConfig;
use crate::types::{
    CLOCK_INTERVAL_MS, DEFAULT_COLS, DEFAULT_ROWS, DROP_INTERVAL_MS, MAX_BOARD_DIM, MIN_BOARD_DIM,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub session: SessionConfig,
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    /// Open an audio output device for music
    pub music: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse_u32 = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| s.parse::<u32>().ok())
        };
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };
        let dim = |key: &str, default: u8| {
            parse_u32(key)
                .map(|v| v.clamp(MIN_BOARD_DIM as u32, MAX_BOARD_DIM as u32) as u8)
                .unwrap_or(default)
        };

        let session = SessionConfig {
            cols: dim("BLOCKFALL_COLS", DEFAULT_COLS),
            rows: dim("BLOCKFALL_ROWS", DEFAULT_ROWS),
            drop_interval_ms: parse_u32("BLOCKFALL_DROP_MS")
                .filter(|ms| *ms > 0)
                .unwrap_or(DROP_INTERVAL_MS),
            clock_interval_ms: CLOCK_INTERVAL_MS,
            seed: parse_u32("BLOCKFALL_SEED").unwrap_or_else(clock_seed),
        };

        let data_dir = non_empty("BLOCKFALL_DATA_DIR")
            .map(PathBuf::from)
            .or_else(|| {
                non_empty("HOME").map(|home| {
                    PathBuf::from(home)
                        .join(".local")
                        .join("share")
                        .join("blockfall")
                })
            })
            .unwrap_or_else(|| PathBuf::from(".blockfall"));

        let log_file = non_empty("BLOCKFALL_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("blockfall.log"));

        let music = !matches!(
            non_empty("BLOCKFALL_MUSIC")
                .map(|v| v.to_ascii_lowercase())
                .as_deref(),
            Some("0" | "off" | "false" | "no")
        );

        Self {
            session,
            data_dir,
            log_file,
            music,
        }
    }
}

fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
