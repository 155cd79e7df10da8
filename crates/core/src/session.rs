//! Session module - the game state machine
//!
//! This module ties together the board, piece catalog, collision rules,
//! scoring and cadences. It owns the only mutable copy of the board and of the
//! active and next pieces.
//!
//! Lifecycle: `Idle -> Running <-> Paused`, `Running -> GameOver`, and
//! `restart` enters `Running` from anywhere. Commands that do not apply to the
//! current phase are ignored and return `false`.
//!
//! Whenever the session leaves `Running`, both cadences are cancelled before
//! the phase changes so no stale gravity step can land afterwards.

use std::vec::Drain;

use crate::collision::{check_collision, freeze};
use crate::pieces::{try_rotate, Piece};
use crate::scoring::{line_clear_points, soft_drop_points};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::timer::Timers;
use crate::types::*;
use crate::{Board, PieceRng};

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub cols: u8,
    pub rows: u8,
    pub drop_interval_ms: u32,
    pub clock_interval_ms: u32,
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            drop_interval_ms: DROP_INTERVAL_MS,
            clock_interval_ms: CLOCK_INTERVAL_MS,
            seed: 1,
        }
    }
}

/// Notifications for the host, drained with [`Session::drain_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new game began (1-based game counter)
    Started { game: u32 },
    /// The active piece was frozen; `cells` visible cells were written
    PieceLocked { cells: usize },
    LinesCleared { rows: usize, points: u32 },
    Paused,
    Resumed,
    /// Emitted once per game, when a fresh piece collides at spawn
    GameOver { score: u32 },
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    active: Option<Piece>,
    next: PieceKind,
    rng: PieceRng,
    score: u32,
    lines: u32,
    phase: Phase,
    timers: Timers,
    games_played: u32,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create an idle session. A next piece is already drawn so it can be
    /// previewed before the first game.
    pub fn new(config: SessionConfig) -> Self {
        let mut rng = PieceRng::new(config.seed);
        let next = rng.draw();
        Self {
            config,
            board: Board::new(config.cols, config.rows),
            active: None,
            next,
            rng,
            score: 0,
            lines: 0,
            phase: Phase::Idle,
            timers: Timers::new(config.drop_interval_ms, config.clock_interval_ms),
            games_played: 0,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for building test fixtures
    #[doc(hidden)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece, for building test fixtures
    #[doc(hidden)]
    pub fn force_active(&mut self, piece: Piece) {
        self.active = Some(piece);
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Whole seconds of running time, as last shown by the clock cadence
    pub fn elapsed_secs(&self) -> u64 {
        self.timers.displayed_secs()
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Drain<'_, SessionEvent> {
        self.events.drain(..)
    }

    /// Start a game. Identical to [`Session::restart`].
    pub fn start(&mut self) {
        self.restart();
    }

    /// Reset board, score and clock, draw a fresh next piece, spawn it and
    /// enter `Running`. Valid from any phase.
    pub fn restart(&mut self) {
        self.timers.reset();

        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.active = None;
        self.next = self.rng.draw();
        self.games_played = self.games_played.wrapping_add(1);

        self.phase = Phase::Running;
        self.timers.arm_all();
        self.events.push(SessionEvent::Started {
            game: self.games_played,
        });
        log::info!("game {} started", self.games_played);

        self.spawn_next();
    }

    /// Promote the next piece to active and draw a new next piece.
    /// Ends the game if the new piece collides where it spawns.
    fn spawn_next(&mut self) {
        let piece = Piece::spawn(self.next, self.board.width());
        self.next = self.rng.draw();
        self.active = Some(piece);

        if check_collision(&self.board, &piece, 0, 0, None) {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.timers.cancel_all();
        self.phase = Phase::GameOver;
        self.events.push(SessionEvent::GameOver { score: self.score });
        log::info!(
            "game {} over: score {} lines {} time {}s",
            self.games_played,
            self.score,
            self.lines,
            self.timers.running_ms() / 1000
        );
    }

    /// Is the active piece free to move by (dx, dy)?
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        match self.active {
            Some(ref piece) => !check_collision(&self.board, piece, dx, dy, None),
            None => false,
        }
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.can_move(dx, dy) {
            return false;
        }
        if let Some(piece) = self.active.as_mut() {
            piece.x += dx;
            piece.y += dy;
        }
        true
    }

    /// Freeze the active piece, clear full rows, score them and spawn the
    /// next piece.
    fn lock_and_spawn(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let cells = freeze(&mut self.board, &piece);
        self.events.push(SessionEvent::PieceLocked { cells });

        let rows = self.board.clear_full_rows();
        if rows > 0 {
            let points = line_clear_points(rows);
            self.score = self.score.saturating_add(points);
            self.lines = self.lines.saturating_add(rows as u32);
            self.events.push(SessionEvent::LinesCleared { rows, points });
            log::debug!("cleared {} rows for {} points", rows, points);
        }

        self.spawn_next();
    }

    pub fn move_left(&mut self) -> bool {
        self.phase.is_running() && self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.phase.is_running() && self.try_move(1, 0)
    }

    /// Manual one-row descent.
    ///
    /// A legal step scores a point. A blocked step freezes the piece exactly
    /// like gravity does and scores only what the freeze clears.
    pub fn soft_drop(&mut self) -> bool {
        if !self.phase.is_running() || self.active.is_none() {
            return false;
        }
        if self.try_move(0, 1) {
            self.score = self.score.saturating_add(soft_drop_points(1));
        } else {
            self.lock_and_spawn();
        }
        true
    }

    /// One gravity step. Unlike [`Session::soft_drop`], a legal step scores
    /// nothing.
    pub fn tick(&mut self) -> bool {
        if !self.phase.is_running() || self.active.is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_and_spawn();
        }
        true
    }

    /// Rotate clockwise in place, or do nothing if the rotated shape collides
    pub fn rotate(&mut self) -> bool {
        if !self.phase.is_running() {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        match try_rotate(&self.board, piece) {
            Some(shape) => {
                piece.shape = shape;
                true
            }
            None => false,
        }
    }

    pub fn pause(&mut self) -> bool {
        if !self.phase.is_running() {
            return false;
        }
        self.timers.cancel_all();
        self.phase = Phase::Paused;
        self.events.push(SessionEvent::Paused);
        true
    }

    /// Re-arm both cadences where they left off
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        self.timers.arm_all();
        self.events.push(SessionEvent::Resumed);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Idle | Phase::GameOver => false,
        }
    }

    /// Advance virtual time.
    ///
    /// Time is consumed up to one descent boundary at a time, so the clock
    /// only counts what elapsed before a [`Session::tick`] that ends the game.
    /// Returns the number of gravity steps applied.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let mut left = elapsed_ms;
        let mut applied = 0;
        while left > 0 && self.phase.is_running() {
            let step = left.min(self.timers.descent().remaining_ms());
            left -= step;
            self.timers.advance_clock(step);
            if self.timers.advance_descent(step) > 0 {
                self.tick();
                applied += 1;
            }
        }
        applied
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cols = self.board.width();
        out.rows = self.board.height();
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next;
        out.next_shape = crate::pieces::spawn_shape(self.next);
        out.score = self.score;
        out.lines = self.lines;
        out.elapsed_secs = self.elapsed_secs();
        out.phase = self.phase;
        out.games_played = self.games_played;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
