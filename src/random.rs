//! Injectable randomness so resets and splits are reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of the random draws the sketch makes.
pub trait RandomSource {
    /// Uniform sample in `[lo, hi]`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;

    /// Fair coin.
    fn coin(&mut self) -> bool {
        self.uniform(0.0, 1.0) < 0.5
    }
}

/// `SmallRng` seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Replays a fixed list of unit samples, mapped onto each requested range.
/// Cycles when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: Vec<f64>,
    next: usize,
}

impl ScriptedRandom {
    /// `samples` are fractions in `[0, 1]`; an empty list behaves as all 0.5.
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, next: 0 }
    }

    fn next_unit(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.5;
        }
        let t = self.samples[self.next % self.samples.len()];
        self.next += 1;
        t.clamp(0.0, 1.0)
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }
}
