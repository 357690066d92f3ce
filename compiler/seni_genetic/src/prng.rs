//! Seeded pseudo-random numbers.

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::Arc;

/// Deterministic generator: the same seed always yields the same sequence.
#[derive(Clone, Debug)]
pub struct Prng(Xoshiro256PlusPlus);

/// A generator shared between the natives of one gene environment.
pub type SharedPrng = Arc<Mutex<Prng>>;

impl Prng {
    pub fn from_seed(seed: u64) -> Self {
        Prng(Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    pub fn shared(seed: u64) -> SharedPrng {
        Arc::new(Mutex::new(Prng::from_seed(seed)))
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.0.gen()
    }

    /// Uniform in `[min, max)`, or `min` when the range is empty.
    pub fn lerp(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.unit()
    }

    /// Uniform index in `[0, len)`; 0 when `len` is 0.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            self.0.gen_range(0..len)
        }
    }
}
