//! # BreedStrategy
//!
//! The `BreedStrategy` trait defines how the next generation is built from a
//! ranked one. Every strategy runs the same four phases in order:
//!
//! 1. **Elitism**: the `elite_count` best individuals are copied unchanged.
//! 2. **Crossover**: `crossover_count` children of two parents drawn
//!    uniformly, with replacement, from the ranked generation.
//! 3. **Mutation**: `mutated_count` mutants, each of a source drawn uniformly
//!    from the elites and crossover children (never from other mutants).
//! 4. **Random fill**: random individuals until `generation_size` is reached.
//!
//! [`SequentialStrategy`] draws everything from the launcher's generator in
//! that order. [`ParallelStrategy`] forks one generator per chunk of work
//! and runs the chunks of each phase on the rayon pool.
pub mod operators;
pub mod parallel;
pub mod sequential;

use std::fmt::Debug;

use crate::{
    error::{GeneticError, Result},
    evolution::options::GaParams,
    population::Population,
    rng::RandomNumberGenerator,
};

/// Builds the next generation from a ranked one.
pub trait BreedStrategy
where
    Self: Debug + Clone + Send + Sync,
{
    /// Breeds a new population of exactly `params.generation_size()`
    /// individuals from `ranked`.
    ///
    /// ## Errors
    ///
    /// This method can fail if:
    /// - `ranked` is empty or smaller than the elite count
    /// - an individual drawn as a crossover parent has no fitness
    /// - `params` has no resolved maximum individual size
    /// - the phases would not add up to the generation size
    fn breed(
        &self,
        ranked: &Population,
        params: &GaParams,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population>;
}

/// Checks the preconditions shared by every strategy and returns the next
/// population seeded with the elites.
pub(crate) fn begin_generation(ranked: &Population, params: &GaParams) -> Result<Population> {
    if ranked.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }

    if params.elite_count() > ranked.len() {
        return Err(GeneticError::Breeding(format!(
            "Elite count {} exceeds ranked population size {}",
            params.elite_count(),
            ranked.len()
        )));
    }

    if params.mutated_count() > 0 && params.elite_count() + params.crossover_count() == 0 {
        return Err(GeneticError::Breeding(
            "No elite or crossover individuals to mutate".to_string(),
        ));
    }

    let mut next = Population::with_capacity(params.generation_size());
    next.extend(ranked.iter().take(params.elite_count()).cloned());
    Ok(next)
}

/// Verifies the bred population has exactly the configured size.
pub(crate) fn finish_generation(next: Population, params: &GaParams) -> Result<Population> {
    if next.len() != params.generation_size() {
        return Err(GeneticError::Breeding(format!(
            "Bred {} individuals, expected {}",
            next.len(),
            params.generation_size()
        )));
    }
    Ok(next)
}

pub use parallel::ParallelStrategy;
pub use sequential::SequentialStrategy;
