//! # ParallelStrategy
//!
//! Breeds each phase in parallel without sharing a generator between threads.
//!
//! Before anything fans out, one child generator is forked from the caller's
//! generator for every chunk of every phase, in a fixed order. Each chunk
//! then writes into its own buffer, and the buffers are concatenated in
//! chunk order. The outcome depends only on the seed and the chunk size,
//! never on how many threads the pool has or how rayon schedules the work.
//!
//! Mutation starts only after crossover has finished and samples from the
//! frozen elites and crossover children.

use rayon::prelude::*;

use super::{
    begin_generation, finish_generation,
    operators::{crossover, mutate, random_individual},
    BreedStrategy,
};
use crate::{
    error::{GeneticError, Result},
    evolution::options::GaParams,
    individual::Individual,
    population::Population,
    rng::RandomNumberGenerator,
};

const DEFAULT_CHUNK_SIZE: usize = 64;

/// Chunked, rayon-backed breeding.
#[derive(Debug, Clone)]
pub struct ParallelStrategy {
    chunk_size: usize,
}

impl ParallelStrategy {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Creates a strategy that hands out work in chunks of `chunk_size`
    /// individuals.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(GeneticError::Configuration(
                "Chunk size cannot be zero".to_string(),
            ));
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Splits `total` work items into chunks, each paired with its own
    /// generator forked from `rng`.
    fn plan(
        &self,
        total: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<(usize, RandomNumberGenerator)> {
        (0..total)
            .step_by(self.chunk_size)
            .map(|start| (self.chunk_size.min(total - start), rng.fork()))
            .collect()
    }
}

impl Default for ParallelStrategy {
    fn default() -> Self {
        Self::new()
    }
}

fn run_chunks<F>(plan: Vec<(usize, RandomNumberGenerator)>, make: F) -> Result<Vec<Individual>>
where
    F: Fn(&mut RandomNumberGenerator) -> Result<Individual> + Sync + Send,
{
    let chunks: Vec<Vec<Individual>> = plan
        .into_par_iter()
        .map(|(count, mut rng)| {
            (0..count)
                .map(|_| make(&mut rng))
                .collect::<Result<Vec<Individual>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(chunks.into_iter().flatten().collect())
}

impl BreedStrategy for ParallelStrategy {
    /// Breeds the next generation.
    ///
    /// ## Performance
    ///
    /// Call this inside the launcher's pool (the launcher does) so the
    /// chunks run on the configured number of threads.
    fn breed(
        &self,
        ranked: &Population,
        params: &GaParams,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
        let mut next = begin_generation(ranked, params)?;

        let bred = params.elite_count() + params.crossover_count() + params.mutated_count();
        let fill_count = params.generation_size().saturating_sub(bred);

        let crossover_plan = self.plan(params.crossover_count(), rng);
        let mutation_plan = self.plan(params.mutated_count(), rng);
        let fill_plan = self.plan(fill_count, rng);

        let parents = ranked.as_slice();
        let children = run_chunks(crossover_plan, |rng| {
            let a = &parents[rng.gen_index(parents.len())];
            let b = &parents[rng.gen_index(parents.len())];
            crossover(a, b, rng)
        })?;
        next.extend(children);

        let sources = next.as_slice();
        let mutants = run_chunks(mutation_plan, |rng| {
            mutate(&sources[rng.gen_index(sources.len())], params, rng)
        })?;
        next.extend(mutants);

        let fill = run_chunks(fill_plan, |rng| Ok(random_individual(params, rng)))?;
        next.extend(fill);

        finish_generation(next, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked_population(size: usize) -> Population {
        (0..size)
            .map(|i| Individual::with_fitness(format!("member-{}", i).into_bytes(), i as f64))
            .collect()
    }

    fn params() -> GaParams {
        GaParams::builder()
            .generation_size(100)
            .elite_count(4)
            .crossover_count(40)
            .mutated_count(30)
            .individual_max_size(16)
            .build()
    }

    #[test]
    fn test_plan_chunks() {
        let strategy = ParallelStrategy::with_chunk_size(4).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(1);
        let sizes: Vec<usize> = strategy.plan(10, &mut rng).into_iter().map(|(n, _)| n).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
        assert!(strategy.plan(0, &mut rng).is_empty());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(matches!(
            ParallelStrategy::with_chunk_size(0),
            Err(GeneticError::Configuration(_))
        ));
    }

    #[test]
    fn test_breed_size_and_elites() {
        let ranked = ranked_population(100);
        let params = params();
        let mut rng = RandomNumberGenerator::from_seed(42);

        let next = ParallelStrategy::with_chunk_size(7)
            .unwrap()
            .breed(&ranked, &params, &mut rng)
            .unwrap();

        assert_eq!(next.len(), 100);
        for i in 0..4 {
            assert_eq!(next[i], ranked[i]);
        }
        for individual in next.iter().skip(44).take(30) {
            assert!((1..=16).contains(&individual.len()));
        }
        for individual in next.iter().skip(74) {
            assert!((1..=30).contains(&individual.len()));
        }
    }

    #[test]
    fn test_breed_independent_of_pool_size() {
        let ranked = ranked_population(100);
        let params = params();
        let strategy = ParallelStrategy::with_chunk_size(8).unwrap();

        let breed_with = |threads: usize| {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap();
            let mut rng = RandomNumberGenerator::from_seed(9);
            pool.install(|| strategy.breed(&ranked, &params, &mut rng).unwrap())
        };

        assert_eq!(breed_with(1), breed_with(4));
    }

    #[test]
    fn test_breed_empty_parents() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let result = ParallelStrategy::new().breed(&Population::new(), &params(), &mut rng);
        assert!(matches!(result, Err(GeneticError::EmptyPopulation)));
    }
}
