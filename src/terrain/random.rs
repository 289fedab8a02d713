use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random source consumed by grid sculpting and terrain generation.
///
/// Empty ranges collapse to their lower bound instead of panicking, so callers
/// can pass grid-derived bounds for tiny grids.
pub trait RandomSource {
    /// Uniform integer in `[min, max)`; `min` when the range is empty.
    fn next_range(&mut self, min: i32, max: i32) -> i32;

    /// Uniform float in `[0, 1)`.
    fn next_double(&mut self) -> f64;

    /// Uniform integer in `[0, bound)`; `0` when `bound <= 0`.
    fn next_int(&mut self, bound: i32) -> i32 {
        self.next_range(0, bound)
    }
}

/// [`RandomSource`] backed by a seeded [`StdRng`].
pub struct SeededRandom(StdRng);

impl SeededRandom {
    /// Creates a reproducible source from `seed`.
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            min
        } else {
            self.0.random_range(min..max)
        }
    }

    fn next_double(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Source that always yields the lowest value of every range.
#[cfg(test)]
pub(crate) struct ZeroRandom;

#[cfg(test)]
impl RandomSource for ZeroRandom {
    fn next_range(&mut self, min: i32, _max: i32) -> i32 {
        min
    }

    fn next_double(&mut self) -> f64 {
        0.0
    }
}
