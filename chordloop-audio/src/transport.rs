//! Transport: play state, tempo, and the measure clock.
//!
//! Elapsed wall time is folded into a fractional measure accumulator.
//! The engine thread asks `take_due_measure()` each tick; every whole
//! measure accumulated yields one scheduling pass with the start time
//! it should have sounded at. Sub-tick remainders carry over, so the
//! measure grid never drifts with tick jitter.

use std::fmt;
use std::time::Duration;

pub const DEFAULT_BPM: f32 = 120.0;

const BEATS_PER_MEASURE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportError {
    InvalidTempo(f32),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTempo(bpm) => write!(f, "invalid tempo {} bpm", bpm),
        }
    }
}

impl std::error::Error for TransportError {}

pub struct Transport {
    running: bool,
    bpm: f32,
    /// Fractional measures accumulated since the last due measure.
    accumulator: f64,
    /// Seconds of wall time since start().
    clock_secs: f64,
    /// Measures scheduled since start(); indexes into the progression.
    step: usize,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(DEFAULT_BPM)
    }
}

impl Transport {
    pub fn new(bpm: f32) -> Self {
        Self {
            running: false,
            bpm,
            accumulator: 0.0,
            clock_secs: 0.0,
            step: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn seconds_per_measure(&self) -> f64 {
        BEATS_PER_MEASURE * 60.0 / self.bpm as f64
    }

    /// Begin playback from measure zero. Primes the accumulator so the
    /// first measure is due immediately. No-op while already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.accumulator = 1.0;
        self.clock_secs = 0.0;
        self.step = 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
        self.clock_secs = 0.0;
        self.step = 0;
    }

    /// Tempo changes apply from the next accumulated instant. The
    /// accumulator holds a measure fraction, so the fraction already
    /// elapsed keeps its musical position at the new tempo.
    pub fn set_tempo(&mut self, bpm: f32) -> Result<(), TransportError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(TransportError::InvalidTempo(bpm));
        }
        self.bpm = bpm;
        Ok(())
    }

    /// Fold elapsed wall time into the clock. No-op while stopped.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.running {
            return;
        }
        let secs = elapsed.as_secs_f64();
        self.clock_secs += secs;
        self.accumulator += secs / self.seconds_per_measure();
    }

    /// Pop one due measure, if any, returning its start time in clock
    /// seconds. Call repeatedly; a long stall yields several measures
    /// with correctly spaced start times.
    pub fn take_due_measure(&mut self) -> Option<f64> {
        if !self.running || self.accumulator < 1.0 {
            return None;
        }
        self.accumulator -= 1.0;
        Some(self.clock_secs - self.accumulator * self.seconds_per_measure())
    }

    pub fn advance_step(&mut self) {
        self.step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_measure_is_due_immediately_at_time_zero() {
        let mut t = Transport::new(120.0);
        t.start();
        assert_eq!(t.take_due_measure(), Some(0.0));
        assert_eq!(t.take_due_measure(), None);
    }

    #[test]
    fn measures_are_spaced_by_seconds_per_measure() {
        let mut t = Transport::new(120.0);
        t.start();
        let spm = t.seconds_per_measure();
        assert_eq!(spm, 2.0);
        let first = t.take_due_measure().unwrap();

        t.advance(Duration::from_secs_f64(spm));
        let second = t.take_due_measure().unwrap();
        assert!((second - first - spm).abs() < 1e-9);
    }

    #[test]
    fn stall_yields_multiple_measures_with_correct_starts() {
        let mut t = Transport::new(120.0);
        t.start();
        assert_eq!(t.take_due_measure(), Some(0.0));

        // 5 seconds at 2s/measure: measures at 2.0 and 4.0 are due.
        t.advance(Duration::from_secs(5));
        let a = t.take_due_measure().unwrap();
        let b = t.take_due_measure().unwrap();
        assert!((a - 2.0).abs() < 1e-9);
        assert!((b - 4.0).abs() < 1e-9);
        assert_eq!(t.take_due_measure(), None);
    }

    #[test]
    fn advance_is_a_no_op_while_stopped() {
        let mut t = Transport::new(120.0);
        t.advance(Duration::from_secs(10));
        assert_eq!(t.take_due_measure(), None);
        t.start();
        t.take_due_measure();
        t.stop();
        t.advance(Duration::from_secs(10));
        assert_eq!(t.take_due_measure(), None);
    }

    #[test]
    fn restart_resets_the_clock_and_step() {
        let mut t = Transport::new(120.0);
        t.start();
        t.take_due_measure();
        t.advance_step();
        t.advance(Duration::from_secs(3));
        t.stop();

        t.start();
        assert_eq!(t.step(), 0);
        assert_eq!(t.take_due_measure(), Some(0.0));
    }

    #[test]
    fn start_while_running_keeps_position() {
        let mut t = Transport::new(120.0);
        t.start();
        t.take_due_measure();
        t.advance_step();

        t.start();
        assert_eq!(t.step(), 1);
        assert_eq!(t.take_due_measure(), None);
    }

    #[test]
    fn set_tempo_rejects_garbage() {
        let mut t = Transport::default();
        assert_eq!(t.set_tempo(0.0), Err(TransportError::InvalidTempo(0.0)));
        assert_eq!(t.set_tempo(-10.0), Err(TransportError::InvalidTempo(-10.0)));
        assert!(t.set_tempo(f32::NAN).is_err());
        assert!(t.set_tempo(f32::INFINITY).is_err());
        assert_eq!(t.bpm(), DEFAULT_BPM);
        t.set_tempo(90.0).unwrap();
        assert_eq!(t.bpm(), 90.0);
    }

    #[test]
    fn tempo_scales_the_measure_length() {
        let mut t = Transport::new(60.0);
        assert_eq!(t.seconds_per_measure(), 4.0);
        t.set_tempo(240.0).unwrap();
        assert_eq!(t.seconds_per_measure(), 1.0);
    }
}
