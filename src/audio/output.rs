//! Speaker output through rodio.
//!
//! The music is generated rather than decoded: [`Chiptune`] is an endless
//! square-ish theme, so the binary ships no audio assets.

use std::time::Duration;

use anyhow::{Context, Result};
use rodio::{OutputStream, Sink, Source};

use super::MusicBackend;

const SAMPLE_RATE: u32 = 44_100;
const NOTE_MS: u64 = 180;

/// Theme in Hz, one entry per note; 0.0 is a rest
const THEME_HZ: [f32; 16] = [
    329.63, 246.94, 261.63, 293.66, 261.63, 246.94, 220.00, 0.0, //
    220.00, 261.63, 329.63, 293.66, 261.63, 246.94, 261.63, 0.0,
];

/// Endless mono theme
#[derive(Debug, Clone, Default)]
pub struct Chiptune {
    frame: u64,
}

impl Chiptune {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note_frames() -> u64 {
        SAMPLE_RATE as u64 * NOTE_MS / 1000
    }

    /// Length of one pass through the theme
    pub fn loop_frames() -> u64 {
        Self::note_frames() * THEME_HZ.len() as u64
    }

    fn sample_at(frame: u64) -> f32 {
        let note_len = Self::note_frames();
        let pos = frame % Self::loop_frames();
        let freq = THEME_HZ[(pos / note_len) as usize];
        if freq == 0.0 {
            return 0.0;
        }

        let in_note = pos % note_len;
        let phase = std::f32::consts::TAU * freq * (in_note as f32 / SAMPLE_RATE as f32);
        // Fundamental plus two odd harmonics.
        let tone = phase.sin() + (3.0 * phase).sin() / 3.0 + (5.0 * phase).sin() / 5.0;

        // 5ms attack, 20ms release; keeps note edges click-free.
        let attack = SAMPLE_RATE as u64 / 200;
        let release = SAMPLE_RATE as u64 / 50;
        let env = if in_note < attack {
            in_note as f32 / attack as f32
        } else if in_note + release > note_len {
            (note_len - in_note) as f32 / release as f32
        } else {
            1.0
        };
        tone * 0.18 * env
    }
}

impl Iterator for Chiptune {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = Self::sample_at(self.frame);
        self.frame = self.frame.wrapping_add(1);
        Some(sample)
    }
}

impl Source for Chiptune {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Music on the default output device
pub struct RodioBackend {
    // Dropping the stream silences the sink.
    _stream: OutputStream,
    sink: Sink,
}

impl RodioBackend {
    /// Open the default device with the theme queued and paused
    pub fn open() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default().context("open audio output")?;
        let sink = Sink::try_new(&handle).context("create audio sink")?;
        sink.pause();
        sink.append(Chiptune::new());
        Ok(Self {
            _stream: stream,
            sink,
        })
    }
}

impl MusicBackend for RodioBackend {
    fn play(&mut self) -> Result<()> {
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.sink.pause();
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.sink.set_volume(volume);
        Ok(())
    }
}

/// Open the default output, or `None` when no device is usable
pub fn open_output() -> Option<Box<dyn MusicBackend>> {
    match RodioBackend::open() {
        Ok(backend) => {
            log::info!("audio output ready");
            Some(Box::new(backend))
        }
        Err(e) => {
            log::warn!("audio disabled: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chiptune_is_endless_mono() {
        let tune = Chiptune::new();
        assert_eq!(tune.channels(), 1);
        assert_eq!(tune.sample_rate(), SAMPLE_RATE);
        assert_eq!(tune.total_duration(), None);
    }

    #[test]
    fn test_samples_stay_quiet_and_audible() {
        let samples: Vec<f32> = Chiptune::new()
            .take(Chiptune::note_frames() as usize)
            .collect();
        assert!(samples.iter().all(|s| s.abs() <= 0.3));
        assert!(samples.iter().any(|s| s.abs() > 0.05));
        // Notes start from silence.
        assert_eq!(samples[0], 0.0);
    }

    #[test]
    fn test_theme_loops() {
        let n = Chiptune::loop_frames();
        for frame in [0, 17, Chiptune::note_frames() * 3 + 250] {
            assert_eq!(Chiptune::sample_at(frame), Chiptune::sample_at(frame + n));
        }
    }

    #[test]
    fn test_rests_are_silent() {
        let rest = Chiptune::note_frames() * 7;
        assert_eq!(Chiptune::sample_at(rest + 100), 0.0);
    }
}
