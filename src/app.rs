//! Host application: wires a session to the leaderboard, audio preferences,
//! music and the name-entry prompt.
//!
//! The app consumes [`SessionEvent`]s after every input and every time step,
//! so reactions (music, score prompt) happen exactly once per event.

use crossterm::event::KeyEvent;

use crate::audio::{MusicBackend, MusicDeck};
use crate::core::{
    AudioPrefs, GameSnapshot, KeyValueStore, Leaderboard, Session, SessionConfig, SessionEvent,
};
use crate::input::{is_interrupt, map_key, map_name_entry_key, Control, NameKey};
use crate::term::{FrameBuffer, GameView, HudView, Overlay, Viewport};
use crate::types::{GameAction, Phase, MAX_NAME_CHARS, VOLUME_STEP};

/// Open name prompt for a qualifying score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub score: u32,
    pub buffer: String,
}

pub struct App<S: KeyValueStore> {
    session: Session,
    leaderboard: Leaderboard<S>,
    prefs: AudioPrefs,
    music: MusicDeck,
    name_entry: Option<NameEntry>,
    quit: bool,
    snapshot: GameSnapshot,
    events: Vec<SessionEvent>,
}

impl<S: KeyValueStore> App<S> {
    /// Load persisted state from `store`. Pass `None` as backend to run
    /// without music.
    pub fn new(
        config: SessionConfig,
        store: S,
        backend: Option<Box<dyn MusicBackend>>,
    ) -> Self {
        let prefs = AudioPrefs::load(&store);
        let leaderboard = Leaderboard::load(store);
        log::info!(
            "loaded {} leaderboard entries, volume {:.2}{}",
            leaderboard.top_entries().len(),
            prefs.volume,
            if prefs.muted { " (muted)" } else { "" }
        );

        let session = Session::new(config);
        let snapshot = session.snapshot();
        Self {
            session,
            leaderboard,
            prefs,
            music: MusicDeck::new(backend, prefs),
            name_entry: None,
            quit: false,
            snapshot,
            events: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    pub fn prefs(&self) -> AudioPrefs {
        self.prefs
    }

    pub fn music(&self) -> &MusicDeck {
        &self.music
    }

    pub fn name_entry(&self) -> Option<&NameEntry> {
        self.name_entry.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Route one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.name_entry.is_some() {
            if is_interrupt(key) {
                self.quit = true;
            } else if let Some(k) = map_name_entry_key(key) {
                self.edit_name(k);
            }
            return;
        }

        if let Some(control) = map_key(key) {
            self.apply_control(control);
        }
    }

    /// Apply a game command or host control. Game commands are ignored while
    /// the name prompt is open.
    pub fn apply_control(&mut self, control: Control) {
        match control {
            Control::Quit => self.quit = true,
            Control::VolumeUp => self.update_prefs(|p| p.adjust_volume(VOLUME_STEP)),
            Control::VolumeDown => self.update_prefs(|p| p.adjust_volume(-VOLUME_STEP)),
            Control::ToggleMute => self.update_prefs(|p| {
                p.toggle_mute();
            }),
            Control::Game(action) => {
                if self.name_entry.is_none() {
                    self.apply_action(action);
                }
            }
        }
    }

    fn apply_action(&mut self, action: GameAction) {
        self.session.apply_action(action);
        self.process_events();
    }

    /// Advance game time by `elapsed_ms`
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.session.advance(elapsed_ms);
        self.process_events();
    }

    fn process_events(&mut self) {
        self.events.extend(self.session.drain_events());
        let events = std::mem::take(&mut self.events);
        for event in &events {
            match *event {
                SessionEvent::Started { .. } | SessionEvent::Resumed => self.music.play(),
                SessionEvent::Paused => self.music.pause(),
                SessionEvent::GameOver { score } => {
                    self.music.pause();
                    if self.leaderboard.record_score_if_qualifying(score) {
                        self.name_entry = Some(NameEntry {
                            score,
                            buffer: String::new(),
                        });
                    }
                }
                SessionEvent::PieceLocked { .. } | SessionEvent::LinesCleared { .. } => {}
            }
        }
        // Hand the allocation back for the next batch.
        self.events = events;
        self.events.clear();
    }

    fn edit_name(&mut self, key: NameKey) {
        let Some(entry) = self.name_entry.as_mut() else {
            return;
        };
        match key {
            NameKey::Char(c) => {
                if entry.buffer.chars().count() < MAX_NAME_CHARS {
                    entry.buffer.push(c);
                }
            }
            NameKey::Backspace => {
                entry.buffer.pop();
            }
            NameKey::Submit => {
                let NameEntry { score, buffer } = entry.clone();
                self.name_entry = None;
                if let Err(e) = self.leaderboard.commit(&buffer, score) {
                    log::warn!("could not save score {}: {:#}", score, e);
                }
            }
            NameKey::Cancel => {
                log::info!("score {} not saved", entry.score);
                self.name_entry = None;
            }
        }
    }

    fn update_prefs(&mut self, change: impl FnOnce(&mut AudioPrefs)) {
        change(&mut self.prefs);
        if let Err(e) = self.prefs.save(self.leaderboard.store_mut()) {
            log::warn!("{:#}", e);
        }
        let running = self.session.phase() == Phase::Running;
        self.music.set_prefs(self.prefs, running);
    }

    /// Current overlay, name prompt first
    pub fn overlay(&self) -> Overlay<'_> {
        if let Some(entry) = &self.name_entry {
            return Overlay::NameEntry {
                score: entry.score,
                name: &entry.buffer,
            };
        }
        match self.session.phase() {
            Phase::Idle => Overlay::Instructions,
            Phase::Paused => Overlay::Paused,
            Phase::GameOver => Overlay::GameOver {
                score: self.session.score(),
            },
            Phase::Running => Overlay::None,
        }
    }

    /// Render the whole screen into `fb`
    pub fn render_into(&mut self, view: &GameView, viewport: Viewport, fb: &mut FrameBuffer) {
        self.session.snapshot_into(&mut self.snapshot);
        let hud = HudView {
            top_entries: self.leaderboard.top_entries(),
            high_score: self.leaderboard.top_score(),
            volume: self.prefs.volume,
            muted: self.prefs.muted,
            audio_enabled: self.music.is_enabled(),
            overlay: self.overlay(),
        };
        view.render_into(&self.snapshot, &hud, viewport, fb);
    }
}
