//! # strevolve
//!
//! A genetic algorithm that evolves a population of byte strings toward a
//! target it only sees through a fitness score.
//!
//! Each generation is ranked in parallel on a rayon pool, then bred into the
//! next one through elitism, crossover, mutation and random fill. All
//! randomness flows from one seeded generator, so runs are reproducible.
//!
//! ```rust
//! use strevolve::{
//!     evolution::{EvolutionLauncher, EvolutionOptions, GaParams, TargetChallenge},
//!     strategy::ParallelStrategy,
//! };
//!
//! let options = EvolutionOptions::builder()
//!     .num_generations(10)
//!     .params(
//!         GaParams::builder()
//!             .generation_size(60)
//!             .elite_count(4)
//!             .crossover_count(25)
//!             .mutated_count(25)
//!             .build(),
//!     )
//!     .build();
//!
//! let mut launcher =
//!     EvolutionLauncher::new(ParallelStrategy::new(), TargetChallenge::new("Rust"), options)?;
//! let result = launcher.evolve()?;
//! println!("{}: {}", result.score, result.best.as_lossy_str());
//! # Ok::<(), strevolve::GeneticError>(())
//! ```

pub mod alphabet;
pub mod error;
pub mod evolution;
pub mod individual;
pub mod population;
pub mod rng;
pub mod strategy;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evolution::{Challenge, EvolutionLauncher, EvolutionOptions, GaParams, TargetChallenge};
pub use individual::Individual;
pub use population::Population;
pub use strategy::{BreedStrategy, ParallelStrategy, SequentialStrategy};
