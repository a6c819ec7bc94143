//! The model's single deterministic random stream.
//!
//! # Determinism strategy
//!
//! Every stochastic draw in the model (price and demand noise, breakdown
//! rolls, recycler efficiency coin flips, garage routing, initial
//! populations) consumes from one `SimRng` seeded from `ModelConfig::seed`.
//! Agents are visited in a fixed order and each archetype draws in a fixed
//! order, so the same seed always replays the same run.
//!
//! There is deliberately no per-agent stream: stage 1 is first-come,
//! first-served and cannot run in parallel anyway.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Model-level RNG threaded through construction and every stage.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    ///
    /// # Panics
    /// Panics if `range` is empty, as `rand` does.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform draw in `[low, high)`; returns `low` for an empty interval
    /// instead of panicking (minimum requirements of zero are common).
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.0.r#gen::<f64>() * (high - low).max(0.0)
    }

    /// Gaussian draw.  A non-finite or negative `sd` yields `mean`.
    #[inline]
    pub fn normal(&mut self, mean: f64, sd: f64) -> f64 {
        if !(sd > 0.0 && sd.is_finite()) {
            return mean;
        }
        match Normal::new(mean, sd) {
            Ok(dist) => dist.sample(&mut self.0),
            Err(_) => mean,
        }
    }
}
