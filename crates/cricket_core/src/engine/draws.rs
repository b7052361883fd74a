//! Sources of uniform draws.
//!
//! Every random decision in a match (toss, outcome, autoplay delivery) is
//! a single draw in `[0, 1)`, so a match is fully determined by its seed
//! or by a scripted draw sequence.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

pub trait DrawSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..n`, taken from one unit draw.
    fn next_index(&mut self, n: usize) -> usize {
        let n = n.max(1);
        ((self.next_unit() * n as f64) as usize).min(n - 1)
    }
}

/// Draws backed by any `rand` generator; ChaCha8 by default.
#[derive(Debug, Clone)]
pub struct RngDraws<R = ChaCha8Rng> {
    rng: R,
}

impl RngDraws<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seeded from OS entropy, for interactive play.
    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }
}

impl<R: RngCore> RngDraws<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> DrawSource for RngDraws<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    script: Vec<f64>,
    queue: VecDeque<f64>,
}

impl ScriptedDraws {
    /// Values are clamped into `[0, 1)`. An empty script yields 0.0.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        let script: Vec<f64> =
            draws.into_iter().map(|d| d.clamp(0.0, 1.0 - f64::EPSILON)).collect();
        Self { queue: script.iter().copied().collect(), script }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn push(&mut self, draw: f64) {
        let draw = draw.clamp(0.0, 1.0 - f64::EPSILON);
        self.script.push(draw);
        self.queue.push_back(draw);
    }
}

impl DrawSource for ScriptedDraws {
    fn next_unit(&mut self) -> f64 {
        if self.queue.is_empty() {
            self.queue.extend(self.script.iter().copied());
        }
        self.queue.pop_front().unwrap_or(0.0)
    }
}

impl<D: DrawSource + ?Sized> DrawSource for &mut D {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<D: DrawSource + ?Sized> DrawSource for Box<D> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}
