//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps a seeded `StdRng` and provides the
//! handful of draws the engine needs: uniform indices, lengths, and
//! probabilities.
//!
//! Every launcher owns exactly one generator. When work fans out across
//! threads, each task receives its own generator produced by [`fork`], drawn
//! from the parent stream in a fixed order before the fan-out, so runs stay
//! reproducible no matter how tasks are scheduled.
//!
//! ## Example
//!
//! ```rust
//! use strevolve::rng::RandomNumberGenerator;
//!
//! let mut a = RandomNumberGenerator::from_seed(42);
//! let mut b = RandomNumberGenerator::from_seed(42);
//! assert_eq!(a.gen_index(100), b.gen_index(100));
//!
//! // Forked children are reproducible as well.
//! let mut child_a = a.fork();
//! let mut child_b = b.fork();
//! assert_eq!(child_a.gen_probability(), child_b.gen_probability());
//! ```
//!
//! [`fork`]: RandomNumberGenerator::fork

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is what the launcher uses so that runs are reproducible.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent child generator from this stream.
    ///
    /// Consumes exactly one `u64` from the parent, so forking in a fixed
    /// order yields the same children on every run.
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.gen::<u64>())
    }

    /// Returns a uniformly distributed index in `0..len`.
    ///
    /// `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Returns a uniformly distributed length in `1..=max`.
    ///
    /// `max` must be non-zero.
    pub fn gen_len(&mut self, max: usize) -> usize {
        self.rng.gen_range(1..=max)
    }

    /// Returns a uniformly distributed value in `[0, 1)`.
    pub fn gen_probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
