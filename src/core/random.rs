/// Random selection primitives — a swappable source of uniform randomness.
///
/// Expansion never touches ambient RNG state; every draw goes through a
/// `RandomSource` passed in by the caller, so tests can substitute a
/// deterministic stub.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RandomError {
    #[error("cannot pick from an empty sequence")]
    EmptySelection,
}

/// A uniform random primitive the expander draws from.
pub trait RandomSource {
    /// Uniform random integer in `[0, limit)`. `limit` must be positive.
    fn chance(&mut self, limit: u32) -> u32;

    /// Uniform random element of `items`.
    ///
    /// Callers are expected to have checked non-emptiness already (the
    /// category index and `source()` reject empty pools); this re-asserts it.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RandomError> {
        if items.is_empty() {
            return Err(RandomError::EmptySelection);
        }
        let idx = self.chance(items.len() as u32) as usize;
        Ok(&items[idx])
    }
}

/// The default `RandomSource`, backed by `rand`'s `StdRng`.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seeded source for reproducible generation.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// OS-entropy source for one-off generation.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn chance(&mut self, limit: u32) -> u32 {
        self.rng.gen_range(0..limit)
    }
}
