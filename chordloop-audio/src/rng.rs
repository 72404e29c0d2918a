//! Random draws for the scheduler.
//!
//! Every probabilistic decision in the engine goes through a
//! `RandomSource`, so a scripted source can replay an exact decision
//! sequence in tests.

/// Source of uniform draws in [0, 1).
pub trait RandomSource: Send {
    fn next_f32(&mut self) -> f32;
}

/// Linear congruential generator. Fast, deterministic from its seed,
/// and good enough for musical coin flips.
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for Lcg {
    fn next_f32(&mut self) -> f32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // Top 24 bits: every value is exactly representable in f32 and
        // the result covers the full [0, 1) range.
        (self.state >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Replays a fixed draw sequence, cycling when exhausted. Test-side
/// counterpart of `Lcg`.
pub struct Scripted {
    values: Vec<f32>,
    position: usize,
}

impl Scripted {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, position: 0 }
    }
}

impl RandomSource for Scripted {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
