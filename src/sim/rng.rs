//! Random sources for throw resolution
//!
//! Every random draw in a match goes through [`RandomSource`], so tests can
//! script exact sequences while real play stays unseeded.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random source on `[0, 1)`
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Uniform value in `[min, max]` (degenerate ranges return `min`)
    fn next_in(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.next_unit() * (max - min)
    }
}

/// PCG-backed source used in play
#[derive(Debug, Clone)]
pub struct PcgSource {
    rng: Pcg32,
}

impl PcgSource {
    /// Seed from the thread RNG (non-reproducible)
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible source for tests and the headless demo
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for PcgSource {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of draws, then falls back to a constant
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: VecDeque<f32>,
    fallback: f32,
}

impl SequenceSource {
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback: 0.0,
        }
    }

    /// Source that always returns `value`
    pub fn constant(value: f32) -> Self {
        Self {
            values: VecDeque::new(),
            fallback: value,
        }
    }

    /// Value returned once the scripted draws run out
    pub fn with_fallback(mut self, value: f32) -> Self {
        self.fallback = value;
        self
    }

    /// Scripted draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}
