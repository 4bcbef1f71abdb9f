//! # Operators
//!
//! The three ways a new individual comes into being: crossover of two ranked
//! parents, mutation of an existing individual, and random generation. Each
//! takes the generator explicitly so callers decide which stream it draws
//! from.

use rand::distributions::{Distribution, WeightedIndex};

use crate::{
    error::{GeneticError, OptionExt, Result},
    evolution::options::GaParams,
    individual::Individual,
    population::Population,
    rng::RandomNumberGenerator,
};

/// Combines two ranked parents into a child.
///
/// The child is `(a.len() + b.len()) / 2` bytes long and starts as a copy of
/// the longer parent (`b` on a tie), truncated to that length. Each position
/// covered by both parents is then taken from `a` with weight `2 + fitness(b)`
/// or from `b` with weight `2 + fitness(a)`. Fitness is a cost, so the parent
/// with the lower score contributes more bytes. Both weights are divided by
/// the larger one, so any finite fitness yields a finite total.
///
/// # Errors
///
/// Returns `InvariantViolation` if either parent is unranked.
///
/// # Example
///
/// ```rust
/// use strevolve::individual::Individual;
/// use strevolve::rng::RandomNumberGenerator;
/// use strevolve::strategy::operators::crossover;
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let a = Individual::with_fitness(b"AAAA".to_vec(), 0.0);
/// let b = Individual::with_fitness(b"BB".to_vec(), 512.0);
///
/// let child = crossover(&a, &b, &mut rng).unwrap();
/// assert_eq!(child.len(), 3);
/// assert_eq!(child.data()[2], b'A');
/// ```
pub fn crossover(
    a: &Individual,
    b: &Individual,
    rng: &mut RandomNumberGenerator,
) -> Result<Individual> {
    let fitness_a = a.ranked_fitness()?;
    let fitness_b = b.ranked_fitness()?;

    let child_len = (a.len() + b.len()) / 2;
    let longer = if a.len() > b.len() { a } else { b };
    let mut data = longer.data()[..child_len].to_vec();

    let weight_a = 2.0 + fitness_b;
    let weight_b = 2.0 + fitness_a;
    let scale = weight_a.max(weight_b);
    let chooser = WeightedIndex::new([weight_a / scale, weight_b / scale])
        .map_err(|e| GeneticError::Breeding(format!("Invalid parent weights: {}", e)))?;
    let parents = [a.data(), b.data()];

    let shared = a.len().min(b.len());
    for (position, byte) in data.iter_mut().enumerate().take(shared) {
        *byte = parents[chooser.sample(&mut rng.rng)][position];
    }

    Ok(Individual::new(data))
}

/// Produces a mutated copy of `source`.
///
/// 1. The copy is resized to a length drawn uniformly from
///    `1..=individual_max_size`.
/// 2. Every position from `source.len() - 1` onwards is overwritten with a
///    random symbol. This includes the last byte the source already had.
/// 3. Every position is independently overwritten with a random symbol with
///    probability `mutation_rate`.
///
/// # Errors
///
/// Returns `Configuration` if `params` has no resolved maximum size.
pub fn mutate(
    source: &Individual,
    params: &GaParams,
    rng: &mut RandomNumberGenerator,
) -> Result<Individual> {
    let max_size = params.individual_max_size().ok_or_else_genetic(|| {
        GeneticError::Configuration("Individual max size has not been resolved".to_string())
    })?;
    let alphabet = params.alphabet();

    let new_len = rng.gen_len(max_size);
    let mut data = source.data().to_vec();
    data.resize(new_len, b'a');

    for symbol in data.iter_mut().skip(source.len().saturating_sub(1)) {
        *symbol = alphabet.sample(rng);
    }

    for symbol in data.iter_mut() {
        if rng.gen_probability() < params.mutation_rate() {
            *symbol = alphabet.sample(rng);
        }
    }

    Ok(Individual::new(data))
}

/// Generates an individual of random length in `1..=random_max_len` made of
/// random symbols.
pub fn random_individual(params: &GaParams, rng: &mut RandomNumberGenerator) -> Individual {
    let alphabet = params.alphabet();
    let len = rng.gen_len(params.random_max_len());
    Individual::new((0..len).map(|_| alphabet.sample(rng)).collect())
}

/// Generates a full generation of random individuals.
pub fn random_population(params: &GaParams, rng: &mut RandomNumberGenerator) -> Population {
    (0..params.generation_size())
        .map(|_| random_individual(params, rng))
        .collect()
}
