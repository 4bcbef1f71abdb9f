//! # Options
//!
//! Configuration for a run, split in two:
//!
//! - [`GaParams`]: the genetic parameters breeding reads (population sizes,
//!   mutation rate, string bounds, alphabet).
//! - [`EvolutionOptions`]: how the launcher drives the run (generation count,
//!   logging, thread count, seed) plus the `GaParams` it hands to breeding.
//!
//! Both are read-only for the duration of a run and are validated when the
//! launcher is constructed, never mid-run.
//!
//! ## Example
//!
//! ```rust
//! use strevolve::evolution::options::{EvolutionOptions, GaParams, LogLevel};
//!
//! let params = GaParams::builder()
//!     .generation_size(50)
//!     .elite_count(2)
//!     .crossover_count(20)
//!     .mutated_count(20)
//!     .mutation_rate(0.1)
//!     .build();
//!
//! let options = EvolutionOptions::builder()
//!     .num_generations(500)
//!     .log_level(LogLevel::Minimal)
//!     .num_threads(1)
//!     .params(params)
//!     .build();
//!
//! assert_eq!(options.get_params().generation_size(), 50);
//! ```

use crate::{
    alphabet::Alphabet,
    error::{GeneticError, Result},
};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Minimal,
    None,
}

/// Genetic parameters of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GaParams {
    generation_size: usize,
    elite_count: usize,
    crossover_count: usize,
    mutated_count: usize,
    /// Probability that mutation rewrites any one symbol.
    mutation_rate: f64,
    /// `None` until resolved against a target: twice the target length.
    individual_max_size: Option<usize>,
    /// Upper bound of the length of randomly generated individuals.
    random_max_len: usize,
    alphabet: Alphabet,
}

impl GaParams {
    pub fn builder() -> GaParamsBuilder {
        GaParamsBuilder::default()
    }

    pub fn generation_size(&self) -> usize {
        self.generation_size
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    pub fn crossover_count(&self) -> usize {
        self.crossover_count
    }

    pub fn mutated_count(&self) -> usize {
        self.mutated_count
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn individual_max_size(&self) -> Option<usize> {
        self.individual_max_size
    }

    pub fn random_max_len(&self) -> usize {
        self.random_max_len
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Fills in the default maximum individual size for a target of
    /// `target_len` bytes and validates the result.
    ///
    /// `target_len` may be `None` only if the maximum size was set explicitly.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if:
    /// - the generation size is zero
    /// - elites, crossovers and mutants together exceed the generation size
    /// - mutants are requested with no elites or crossovers to mutate
    /// - the mutation rate is not a probability
    /// - the maximum individual size is zero or cannot be derived
    /// - the random length bound is zero
    pub fn resolve(mut self, target_len: Option<usize>) -> Result<Self> {
        if self.individual_max_size.is_none() {
            let target_len = target_len.ok_or_else(|| {
                GeneticError::Configuration(
                    "Individual max size must be set when the target length is unknown"
                        .to_string(),
                )
            })?;
            self.individual_max_size = Some(target_len * 2);
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks every parameter, without filling in defaults.
    pub fn validate(&self) -> Result<()> {
        if self.generation_size == 0 {
            return Err(GeneticError::Configuration(
                "Generation size cannot be zero".to_string(),
            ));
        }

        let bred = self.elite_count + self.crossover_count + self.mutated_count;
        if bred > self.generation_size {
            return Err(GeneticError::Configuration(format!(
                "Elite ({}) + crossover ({}) + mutated ({}) count {} exceeds generation size {}",
                self.elite_count,
                self.crossover_count,
                self.mutated_count,
                bred,
                self.generation_size
            )));
        }

        if self.mutated_count > 0 && self.elite_count + self.crossover_count == 0 {
            return Err(GeneticError::Configuration(
                "Mutation needs at least one elite or crossover individual to draw from"
                    .to_string(),
            ));
        }

        if !self.mutation_rate.is_finite() || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GeneticError::Configuration(format!(
                "Mutation rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }

        match self.individual_max_size {
            Some(0) => {
                return Err(GeneticError::Configuration(
                    "Individual max size cannot be zero".to_string(),
                ))
            }
            Some(_) => {}
            None => {
                return Err(GeneticError::Configuration(
                    "Individual max size has not been resolved".to_string(),
                ))
            }
        }

        if self.random_max_len == 0 {
            return Err(GeneticError::Configuration(
                "Random individual length bound cannot be zero".to_string(),
            ));
        }

        if self.alphabet.is_empty() {
            return Err(GeneticError::Configuration(
                "Allowed-symbol alphabet cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            generation_size: 500,
            elite_count: 10,
            crossover_count: 200,
            mutated_count: 200,
            mutation_rate: 0.05,
            individual_max_size: None,
            random_max_len: 30,
            alphabet: Alphabet::default(),
        }
    }
}

/// Builder for `GaParams`. Unset fields take the `GaParams::default()` values.
#[derive(Debug, Clone, Default)]
pub struct GaParamsBuilder {
    generation_size: Option<usize>,
    elite_count: Option<usize>,
    crossover_count: Option<usize>,
    mutated_count: Option<usize>,
    mutation_rate: Option<f64>,
    individual_max_size: Option<usize>,
    random_max_len: Option<usize>,
    alphabet: Option<Alphabet>,
}

impl GaParamsBuilder {
    pub fn generation_size(mut self, value: usize) -> Self {
        self.generation_size = Some(value);
        self
    }

    pub fn elite_count(mut self, value: usize) -> Self {
        self.elite_count = Some(value);
        self
    }

    pub fn crossover_count(mut self, value: usize) -> Self {
        self.crossover_count = Some(value);
        self
    }

    pub fn mutated_count(mut self, value: usize) -> Self {
        self.mutated_count = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn individual_max_size(mut self, value: usize) -> Self {
        self.individual_max_size = Some(value);
        self
    }

    pub fn random_max_len(mut self, value: usize) -> Self {
        self.random_max_len = Some(value);
        self
    }

    pub fn alphabet(mut self, value: Alphabet) -> Self {
        self.alphabet = Some(value);
        self
    }

    pub fn build(self) -> GaParams {
        let defaults = GaParams::default();
        GaParams {
            generation_size: self.generation_size.unwrap_or(defaults.generation_size),
            elite_count: self.elite_count.unwrap_or(defaults.elite_count),
            crossover_count: self.crossover_count.unwrap_or(defaults.crossover_count),
            mutated_count: self.mutated_count.unwrap_or(defaults.mutated_count),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            individual_max_size: self.individual_max_size.or(defaults.individual_max_size),
            random_max_len: self.random_max_len.unwrap_or(defaults.random_max_len),
            alphabet: self.alphabet.unwrap_or(defaults.alphabet),
        }
    }
}

/// How the launcher drives a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_generations: usize,
    log_level: LogLevel,
    /// Report the best individual every this many generations; 0 disables.
    report_interval: usize,
    /// Ranking workers; `None` means detected hardware concurrency.
    num_threads: Option<usize>,
    seed: u64,
    /// Keep the best fitness of every generation in the result. Costs one
    /// `f64` per generation, so very long runs may want it off.
    record_history: bool,
    params: GaParams,
}

impl EvolutionOptions {
    pub fn new(num_generations: usize, log_level: LogLevel, params: GaParams) -> Self {
        Self {
            num_generations,
            log_level,
            params,
            ..Self::default()
        }
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn get_report_interval(&self) -> usize {
        self.report_interval
    }

    pub fn get_num_threads(&self) -> Option<usize> {
        self.num_threads
    }

    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    pub fn get_record_history(&self) -> bool {
        self.record_history
    }

    pub fn get_params(&self) -> &GaParams {
        &self.params
    }

    /// Sets the number of generations.
    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    /// Sets the log level.
    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Sets the reporting cadence.
    pub fn set_report_interval(&mut self, report_interval: usize) {
        self.report_interval = report_interval;
    }

    /// Sets the number of ranking workers.
    pub fn set_num_threads(&mut self, num_threads: Option<usize>) {
        self.num_threads = num_threads;
    }

    /// Sets the generator seed.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Sets whether per-generation best fitness is kept.
    pub fn set_record_history(&mut self, record_history: bool) {
        self.record_history = record_history;
    }

    /// Sets the genetic parameters.
    pub fn set_params(&mut self, params: GaParams) {
        self.params = params;
    }

    /// Number of ranking workers to use: the configured count, or the
    /// detected hardware concurrency with a fallback of 1.
    pub fn resolve_num_threads(&self) -> Result<usize> {
        match self.num_threads {
            Some(0) => Err(GeneticError::Configuration(
                "Number of threads cannot be zero".to_string(),
            )),
            Some(n) => Ok(n),
            None => Ok(std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)),
        }
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_generations: 10_000,
            log_level: LogLevel::None,
            report_interval: 1000,
            num_threads: None,
            seed: 42,
            record_history: true,
            params: GaParams::default(),
        }
    }
}

/// Builder for `EvolutionOptions`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_generations: Option<usize>,
    log_level: Option<LogLevel>,
    report_interval: Option<usize>,
    num_threads: Option<usize>,
    seed: Option<u64>,
    record_history: Option<bool>,
    params: Option<GaParams>,
}

impl EvolutionOptionsBuilder {
    /// Sets the number of generations.
    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    /// Sets the log level.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Sets the reporting cadence in generations.
    pub fn report_interval(mut self, value: usize) -> Self {
        self.report_interval = Some(value);
        self
    }

    /// Sets the number of ranking workers.
    pub fn num_threads(mut self, value: usize) -> Self {
        self.num_threads = Some(value);
        self
    }

    /// Sets the generator seed.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Sets whether per-generation best fitness is kept.
    pub fn record_history(mut self, value: bool) -> Self {
        self.record_history = Some(value);
        self
    }

    /// Sets the genetic parameters.
    pub fn params(mut self, value: GaParams) -> Self {
        self.params = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            num_generations: self.num_generations.unwrap_or(defaults.num_generations),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            report_interval: self.report_interval.unwrap_or(defaults.report_interval),
            num_threads: self.num_threads.or(defaults.num_threads),
            seed: self.seed.unwrap_or(defaults.seed),
            record_history: self.record_history.unwrap_or(defaults.record_history),
            params: self.params.unwrap_or(defaults.params),
        }
    }
}
