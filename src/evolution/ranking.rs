//! # RankingStage
//!
//! Scores every individual of a population and sorts it ascending by
//! fitness, so the best individual ends up first.
//!
//! Evaluation runs on a dedicated rayon pool. The population is split into
//! one contiguous chunk per worker and each worker writes only the fitness
//! fields of its own chunk, so no locking is involved. Sorting happens once
//! all chunks have finished.

use std::ops::Range;
use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::{challenge::Challenge, launcher::StopSignal};
use crate::{
    error::{panic_to_error, GeneticError, Result, ResultExt},
    individual::Individual,
    population::Population,
};

/// Parallel fitness evaluation followed by a sort.
pub struct RankingStage {
    workers: usize,
    pool: ThreadPool,
}

impl std::fmt::Debug for RankingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingStage")
            .field("workers", &self.workers)
            .finish()
    }
}

impl RankingStage {
    /// Builds a stage backed by a pool of `workers` threads.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `workers` is zero and
    /// `GeneticError::Other` if the pool cannot be created.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(GeneticError::Configuration(
                "Ranking needs at least one worker".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("strevolve-rank-{}", i))
            .build()
            .context("Failed to build ranking thread pool")?;

        Ok(Self { workers, pool })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `op` inside this stage's pool, so nested rayon work uses the
    /// configured number of threads.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Scores and sorts `population` in place.
    ///
    /// # Errors
    ///
    /// - `FitnessCalculation` if the challenge returns NaN or infinity.
    /// - `InvariantViolation` if the challenge returns a negative score.
    /// - `Cancelled` if `stop` is raised before every chunk has started.
    /// - `WorkerPanic` if a worker panics.
    ///
    /// On error the population keeps its previous order and may hold a mix of
    /// old and new fitness values.
    pub fn rank<C>(
        &self,
        population: &mut Population,
        challenge: &C,
        stop: &StopSignal,
    ) -> Result<()>
    where
        C: Challenge + ?Sized,
    {
        let bounds = chunk_bounds(population.len(), self.workers);
        let chunks = split_chunks(population.as_mut_slice(), &bounds);

        catch_unwind(AssertUnwindSafe(|| {
            self.pool.install(|| {
                chunks
                    .into_par_iter()
                    .try_for_each(|chunk| evaluate_chunk(chunk, challenge, stop))
            })
        }))
        .map_err(panic_to_error)??;

        // Scores are validated finite, so total_cmp agrees with numeric order.
        population
            .as_mut_slice()
            .sort_by(|a, b| fitness_of(a).total_cmp(&fitness_of(b)));

        Ok(())
    }
}

fn fitness_of(individual: &Individual) -> f64 {
    individual.fitness().unwrap_or(f64::INFINITY)
}

fn evaluate_chunk<C>(chunk: &mut [Individual], challenge: &C, stop: &StopSignal) -> Result<()>
where
    C: Challenge + ?Sized,
{
    if stop.is_stopped() {
        return Err(GeneticError::Cancelled);
    }

    for individual in chunk.iter_mut() {
        let score = challenge.score(individual.data());

        if !score.is_finite() {
            return Err(GeneticError::FitnessCalculation(format!(
                "Non-finite fitness score {} for {:?}",
                score,
                individual.as_lossy_str()
            )));
        }
        if score < 0.0 {
            return Err(GeneticError::InvariantViolation(format!(
                "Negative fitness score {} for {:?}",
                score,
                individual.as_lossy_str()
            )));
        }

        individual.set_fitness(score);
    }

    Ok(())
}

/// Splits `0..len` into `workers` contiguous ranges of `len / workers`
/// elements each, the last range also taking the remainder.
pub fn chunk_bounds(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let chunk_size = len / workers;

    (0..workers)
        .map(|t| {
            let start = t * chunk_size;
            let end = if t == workers - 1 { len } else { start + chunk_size };
            start..end
        })
        .collect()
}

fn split_chunks<'a, T>(mut slice: &'a mut [T], bounds: &[Range<usize>]) -> Vec<&'a mut [T]> {
    let mut chunks = Vec::with_capacity(bounds.len());
    let mut offset = 0;

    for range in bounds {
        let (head, tail) = std::mem::take(&mut slice).split_at_mut(range.end - offset);
        offset = range.end;
        chunks.push(head);
        slice = tail;
    }

    chunks
}
