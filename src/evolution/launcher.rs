use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Instant;

use tracing::{debug, info};

use super::{
    challenge::Challenge,
    options::{EvolutionOptions, GaParams, LogLevel},
    ranking::RankingStage,
};
use crate::{
    error::{panic_to_error, GeneticError, OptionExt, Result},
    individual::Individual,
    population::Population,
    rng::RandomNumberGenerator,
    strategy::{operators::random_population, BreedStrategy},
};

/// Represents the result of an evolution: the best individual found and its score.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// The best individual of the last fully ranked generation.
    pub best: Individual,
    /// The fitness score of `best`.
    pub score: f64,
    /// Number of generations that were ranked and bred.
    pub generations: usize,
    /// Whether the run was stopped before reaching the configured count.
    pub cancelled: bool,
    /// Best fitness of every ranked generation, in order. Empty when
    /// history recording is turned off in the options.
    pub history: Vec<f64>,
}

/// What one generation looked like once ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Zero-based index of the generation.
    pub generation: usize,
    pub best_fitness: f64,
    pub best: Individual,
}

/// Where the launcher is in its generational loop.
///
/// A new launcher sits in `Initializing` with its random first population
/// until the first step. Between steps it waits in `Ranking`, and it is
/// `Done` once `evolve` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Initializing,
    Ranking,
    Breeding,
    Done,
}

/// A cooperative stop request shared between the launcher and its caller.
///
/// The launcher checks it at every generation boundary and each ranking
/// worker checks it before starting its chunk.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Drives the evolution of a population of strings toward a challenge.
///
/// The launcher owns the seeded generator, the ranking pool and the one
/// current population. Each generation is ranked, optionally reported, bred
/// into a new population, and the new population replaces the old one.
///
/// # Example
///
/// ```rust
/// use strevolve::evolution::{EvolutionLauncher, EvolutionOptions, GaParams, TargetChallenge};
/// use strevolve::strategy::SequentialStrategy;
///
/// let params = GaParams::builder()
///     .generation_size(40)
///     .elite_count(2)
///     .crossover_count(15)
///     .mutated_count(15)
///     .build();
/// let options = EvolutionOptions::builder()
///     .num_generations(20)
///     .num_threads(2)
///     .params(params)
///     .build();
///
/// let mut launcher = EvolutionLauncher::new(
///     SequentialStrategy::new(),
///     TargetChallenge::new("Hi"),
///     options,
/// )
/// .unwrap();
///
/// let result = launcher.evolve().unwrap();
/// assert_eq!(result.generations, 20);
/// assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
/// ```
#[derive(Debug)]
pub struct EvolutionLauncher<Strategy, Chall>
where
    Strategy: BreedStrategy,
    Chall: Challenge,
{
    strategy: Strategy,
    challenge: Chall,
    options: EvolutionOptions,
    params: GaParams,
    ranking: RankingStage,
    rng: RandomNumberGenerator,
    population: Population,
    state: DriverState,
    generation: usize,
    best: Option<Individual>,
    history: Vec<f64>,
    stop: StopSignal,
}

impl<Strategy, Chall> EvolutionLauncher<Strategy, Chall>
where
    Strategy: BreedStrategy,
    Chall: Challenge,
{
    /// Validates the configuration, builds the ranking pool and the initial
    /// random population.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` for any invalid parameter (see
    /// [`GaParams::resolve`] and [`EvolutionOptions::resolve_num_threads`]).
    pub fn new(strategy: Strategy, challenge: Chall, options: EvolutionOptions) -> Result<Self> {
        let params = options
            .get_params()
            .clone()
            .resolve(challenge.target_len())?;
        let workers = options.resolve_num_threads()?;
        let ranking = RankingStage::new(workers)?;
        let mut rng = RandomNumberGenerator::from_seed(options.get_seed());

        debug!(
            generation_size = params.generation_size(),
            elite_count = params.elite_count(),
            crossover_count = params.crossover_count(),
            mutated_count = params.mutated_count(),
            mutation_rate = params.mutation_rate(),
            individual_max_size = ?params.individual_max_size(),
            workers,
            seed = options.get_seed(),
            "Initializing population"
        );

        let population = random_population(&params, &mut rng);

        Ok(Self {
            strategy,
            challenge,
            options,
            params,
            ranking,
            rng,
            population,
            state: DriverState::Initializing,
            generation: 0,
            best: None,
            history: Vec::new(),
            stop: StopSignal::new(),
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Number of generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    /// The validated parameters, with the maximum individual size resolved.
    pub fn params(&self) -> &GaParams {
        &self.params
    }

    pub fn workers(&self) -> usize {
        self.ranking.workers()
    }

    /// A handle that stops the run at the next generation boundary.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Ranks the current population, breeds the next one and swaps it in.
    ///
    /// # Errors
    ///
    /// Fails if the launcher is already done, if ranking rejects a score or is
    /// cancelled, or if breeding fails. After a failed step the launcher is
    /// back in `Ranking` with the same generation count and history. The
    /// population keeps its individuals, though a successful ranking will
    /// have scored and reordered them.
    pub fn step(&mut self) -> Result<GenerationReport> {
        if self.state == DriverState::Done {
            return Err(GeneticError::Evolution(
                "Cannot step a finished evolution".to_string(),
            ));
        }

        let started = Instant::now();

        self.state = DriverState::Ranking;
        self.ranking
            .rank(&mut self.population, &self.challenge, &self.stop)?;
        let previous_best = self.best.clone();
        let report = self.record_best()?;
        self.report(&report);

        self.state = DriverState::Breeding;
        let next = match self.breed() {
            Ok(next) => next,
            Err(e) => {
                if self.options.get_record_history() {
                    self.history.pop();
                }
                self.best = previous_best;
                self.state = DriverState::Ranking;
                return Err(e);
            }
        };
        self.population = next;
        self.generation += 1;
        self.state = DriverState::Ranking;

        if self.options.get_log_level() == LogLevel::Verbose {
            debug!(
                generation = report.generation,
                duration_us = started.elapsed().as_micros() as u64,
                "Generation complete"
            );
        }

        Ok(report)
    }

    /// Runs the remaining generations and returns the best individual.
    ///
    /// The final bred population is ranked once more so the result reflects
    /// it. If the stop signal is raised, the best individual of the last
    /// fully ranked generation is returned with `cancelled` set.
    pub fn evolve(&mut self) -> Result<EvolutionResult> {
        while self.generation < self.options.get_num_generations() {
            if self.stop.is_stopped() {
                return self.finish_cancelled();
            }

            match self.step() {
                Ok(_) => {}
                Err(GeneticError::Cancelled) => return self.finish_cancelled(),
                Err(e) => {
                    return Err(GeneticError::Evolution(format!(
                        "Generation {} failed: {}",
                        self.generation, e
                    )))
                }
            }
        }

        match self
            .ranking
            .rank(&mut self.population, &self.challenge, &self.stop)
        {
            Ok(()) => {}
            Err(GeneticError::Cancelled) => return self.finish_cancelled(),
            Err(e) => return Err(e),
        }
        self.record_best()?;
        self.state = DriverState::Done;

        self.result(false)
    }

    fn breed(&mut self) -> Result<Population> {
        let Self {
            strategy,
            params,
            ranking,
            rng,
            population,
            ..
        } = self;

        catch_unwind(AssertUnwindSafe(|| {
            ranking.install(|| strategy.breed(population, params, rng))
        }))
        .map_err(panic_to_error)?
    }

    /// Remembers the head of the freshly ranked population.
    fn record_best(&mut self) -> Result<GenerationReport> {
        let best = self
            .population
            .best()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?
            .clone();
        let best_fitness = best.ranked_fitness()?;

        if self.options.get_record_history() {
            self.history.push(best_fitness);
        }
        self.best = Some(best.clone());

        Ok(GenerationReport {
            generation: self.generation,
            best_fitness,
            best,
        })
    }

    fn report(&self, report: &GenerationReport) {
        let interval = self.options.get_report_interval();
        if interval == 0 || report.generation % interval != 0 {
            return;
        }

        match self.options.get_log_level() {
            LogLevel::Minimal => info!(
                generation = report.generation,
                best_fitness = report.best_fitness,
                "Best individual"
            ),
            LogLevel::Verbose => info!(
                generation = report.generation,
                best_fitness = report.best_fitness,
                best = %report.best.as_lossy_str(),
                "Best individual"
            ),
            LogLevel::None => {}
        }
    }

    fn finish_cancelled(&mut self) -> Result<EvolutionResult> {
        info!(generation = self.generation, "Evolution stopped");
        self.state = DriverState::Done;
        self.result(true)
    }

    fn result(&self, cancelled: bool) -> Result<EvolutionResult> {
        let best = self.best.clone().ok_or_else_genetic(|| {
            GeneticError::Evolution(
                "Evolution stopped before any generation was ranked".to_string(),
            )
        })?;
        let score = best.ranked_fitness()?;

        Ok(EvolutionResult {
            best,
            score,
            generations: self.generation,
            cancelled,
            history: self.history.clone(),
        })
    }
}
