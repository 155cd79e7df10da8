//! Audio preferences, persisted under the `audio` key

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;
use crate::types::DEFAULT_VOLUME;

/// Storage key of the audio preference record
pub const AUDIO_KEY: &str = "audio";

/// Music volume and mute flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioPrefs {
    /// Linear volume in `[0, 1]`
    pub volume: f32,
    pub muted: bool,
}

impl Default for AudioPrefs {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
        }
    }
}

impl AudioPrefs {
    /// Load from `store`, falling back to defaults on missing or corrupt data
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let json = match store.get(AUDIO_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return Self::default(),
            Err(e) => {
                log::warn!("audio preferences unavailable: {:#}", e);
                return Self::default();
            }
        };

        match serde_json::from_str::<AudioPrefs>(&json) {
            Ok(mut prefs) => {
                prefs.volume = sanitize_volume(prefs.volume);
                prefs
            }
            Err(e) => {
                log::warn!("ignoring corrupt audio preferences: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        let json = serde_json::to_string(self).context("encode audio preferences")?;
        store
            .set(AUDIO_KEY, &json)
            .context("save audio preferences")
    }

    /// Set the volume (clamped). Touching the volume always un-mutes.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_finite() {
            self.volume = volume.clamp(0.0, 1.0);
        }
        self.muted = false;
    }

    /// Step the volume by `delta`, rounded to whole percent
    pub fn adjust_volume(&mut self, delta: f32) {
        let next = ((self.volume + delta) * 100.0).round() / 100.0;
        self.set_volume(next);
    }

    /// Flip the mute flag and return the new value
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Volume actually sent to the output, 0 while muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}

fn sanitize_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        DEFAULT_VOLUME
    }
}
