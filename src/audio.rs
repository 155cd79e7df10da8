//! Background music control.
//!
//! The game only needs a looping track that can be started, paused and
//! re-levelled. Actual playback is behind [`MusicBackend`]; without one the
//! deck runs silently and every call is a no-op. [`RodioBackend`] plays a
//! generated theme on the default output device. Backend failures are logged
//! and never reach game logic.

mod output;

use anyhow::Result;

use crate::core::AudioPrefs;

pub use output::{open_output, Chiptune, RodioBackend};

/// A music output device
pub trait MusicBackend {
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    /// Linear volume in `[0, 1]`; 0 while muted
    fn set_volume(&mut self, volume: f32) -> Result<()>;
}

/// Music state driven by game events and audio preferences
pub struct MusicDeck {
    backend: Option<Box<dyn MusicBackend>>,
    playing: bool,
    prefs: AudioPrefs,
}

impl MusicDeck {
    pub fn new(backend: Option<Box<dyn MusicBackend>>, prefs: AudioPrefs) -> Self {
        if backend.is_none() {
            log::info!("no music backend - audio disabled");
        }
        let mut deck = Self {
            backend,
            playing: false,
            prefs,
        };
        deck.apply_volume();
        deck
    }

    /// A deck with no output
    pub fn disabled(prefs: AudioPrefs) -> Self {
        Self::new(None, prefs)
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn prefs(&self) -> AudioPrefs {
        self.prefs
    }

    /// Start or continue the track unless muted
    pub fn play(&mut self) {
        if self.prefs.muted || self.playing {
            return;
        }
        if self.call("play", |b| b.play()) {
            self.playing = true;
        }
    }

    pub fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.call("pause", |b| b.pause());
        self.playing = false;
    }

    /// Adopt new preferences: re-level, and stop or resume for mute changes
    pub fn set_prefs(&mut self, prefs: AudioPrefs, resume: bool) {
        let was_muted = self.prefs.muted;
        self.prefs = prefs;
        self.apply_volume();
        if prefs.muted && !was_muted {
            self.pause();
        } else if !prefs.muted && resume {
            self.play();
        }
    }

    fn apply_volume(&mut self) {
        let volume = self.prefs.effective_volume();
        self.call("set volume", |b| b.set_volume(volume));
    }

    /// Run `f` on the backend. Returns true on success or when disabled.
    fn call(&mut self, what: &str, f: impl FnOnce(&mut dyn MusicBackend) -> Result<()>) -> bool {
        let Some(backend) = self.backend.as_deref_mut() else {
            return true;
        };
        match f(backend) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("music {} failed: {:#}", what, e);
                false
            }
        }
    }
}
