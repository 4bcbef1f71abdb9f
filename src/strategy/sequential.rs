use super::{
    begin_generation, finish_generation,
    operators::{crossover, mutate, random_individual},
    BreedStrategy,
};
use crate::{
    error::Result, evolution::options::GaParams, population::Population,
    rng::RandomNumberGenerator,
};

/// # SequentialStrategy
///
/// Runs the breeding phases one after another on the caller's generator.
/// Given the same generator state it always produces the same population.
#[derive(Debug, Clone, Default)]
pub struct SequentialStrategy;

impl SequentialStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl BreedStrategy for SequentialStrategy {
    fn breed(
        &self,
        ranked: &Population,
        params: &GaParams,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
        let mut next = begin_generation(ranked, params)?;

        for _ in 0..params.crossover_count() {
            let a = &ranked[rng.gen_index(ranked.len())];
            let b = &ranked[rng.gen_index(ranked.len())];
            next.push(crossover(a, b, rng)?);
        }

        // Mutants only ever derive from elites and crossover children.
        let sources = next.len();
        for _ in 0..params.mutated_count() {
            let mutant = mutate(&next[rng.gen_index(sources)], params, rng)?;
            next.push(mutant);
        }

        while next.len() < params.generation_size() {
            next.push(random_individual(params, rng));
        }

        finish_generation(next, params)
    }
}
