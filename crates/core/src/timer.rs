//! Cadences - cancellable recurring timers driven by elapsed milliseconds
//!
//! The session owns two cadences: gravity (descent) and the elapsed-time
//! clock. Both are advanced with virtual time by the host, so a test can step
//! a clock past any number of intervals without sleeping.
//!
//! A cancelled cadence keeps its progress but never fires until re-armed.

use crate::types::{CLOCK_INTERVAL_MS, DROP_INTERVAL_MS};

/// A recurring timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    interval_ms: u32,
    progress_ms: u32,
    armed: bool,
}

impl Cadence {
    /// New disarmed cadence. Intervals below 1ms are raised to 1ms.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            progress_ms: 0,
            armed: false,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn progress_ms(&self) -> u32 {
        self.progress_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Milliseconds until the next fire, counted from the current progress
    pub fn remaining_ms(&self) -> u32 {
        self.interval_ms - self.progress_ms
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    /// Disarm and forget progress
    pub fn reset(&mut self) {
        self.armed = false;
        self.progress_ms = 0;
    }

    /// Advance by `elapsed_ms` and return how many times the cadence fired
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if !self.armed {
            return 0;
        }
        let total = self.progress_ms as u64 + elapsed_ms as u64;
        let interval = self.interval_ms as u64;
        self.progress_ms = (total % interval) as u32;
        (total / interval) as u32
    }
}

/// The session's two cadences plus the running-time accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    descent: Cadence,
    clock: Cadence,
    running_ms: u64,
    displayed_secs: u64,
}

impl Timers {
    pub fn new(drop_interval_ms: u32, clock_interval_ms: u32) -> Self {
        Self {
            descent: Cadence::new(drop_interval_ms),
            clock: Cadence::new(clock_interval_ms),
            running_ms: 0,
            displayed_secs: 0,
        }
    }

    /// Zero everything and disarm both cadences
    pub fn reset(&mut self) {
        self.descent.reset();
        self.clock.reset();
        self.running_ms = 0;
        self.displayed_secs = 0;
    }

    pub fn arm_all(&mut self) {
        self.descent.arm();
        self.clock.arm();
    }

    /// Disarm both cadences as a unit
    pub fn cancel_all(&mut self) {
        self.descent.cancel();
        self.clock.cancel();
    }

    pub fn is_armed(&self) -> bool {
        self.descent.is_armed() || self.clock.is_armed()
    }

    /// Advance the clock cadence and the running-time accumulator.
    ///
    /// Time only accumulates while the clock is armed, which keeps paused
    /// stretches out of the elapsed total.
    pub fn advance_clock(&mut self, elapsed_ms: u32) {
        if !self.clock.is_armed() {
            return;
        }
        self.running_ms += elapsed_ms as u64;
        if self.clock.advance(elapsed_ms) > 0 {
            self.displayed_secs = self.running_ms / 1000;
        }
    }

    /// Advance the descent cadence, returning how many gravity steps are due
    pub fn advance_descent(&mut self, elapsed_ms: u32) -> u32 {
        self.descent.advance(elapsed_ms)
    }

    pub fn descent(&self) -> &Cadence {
        &self.descent
    }

    pub fn clock(&self) -> &Cadence {
        &self.clock
    }

    /// Milliseconds spent running, excluding pauses
    pub fn running_ms(&self) -> u64 {
        self.running_ms
    }

    /// Whole seconds as of the last clock fire
    pub fn displayed_secs(&self) -> u64 {
        self.displayed_secs
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new(DROP_INTERVAL_MS, CLOCK_INTERVAL_MS)
    }
}

/// Format whole seconds as zero-padded `MM:SS`
///
/// ```
/// use blockfall_core::timer::format_elapsed;
///
/// assert_eq!(format_elapsed(0), "00:00");
/// assert_eq!(format_elapsed(75), "01:15");
/// ```
pub fn format_elapsed(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
