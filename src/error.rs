//! # Error Types
//!
//! This module defines the error type shared by every stage of the string
//! evolution engine. Configuration problems are reported when a launcher is
//! constructed; everything else surfaces while ranking or breeding a
//! generation and aborts that generation.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use strevolve::error::{GeneticError, Result};
//!
//! fn check_size(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(GeneticError::Configuration(
//!             "Generation size cannot be zero".to_string(),
//!         ));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(check_size(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use strevolve::error::{GeneticError, OptionExt};
//!
//! fn first_score(scores: &[f64]) -> strevolve::error::Result<f64> {
//!     scores.first().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(first_score(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while evolving a population of strings.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when a breeding operation fails.
    #[error("Breeding error: {0}")]
    Breeding(String),

    /// Error that occurs when the generational driver is misused or fails.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when the evaluator returns NaN or infinity.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when an internal invariant does not hold, such as a
    /// negative fitness score or breeding from an unranked individual.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Error that occurs when a worker task panics.
    #[error("Worker panicked: {0}")]
    WorkerPanic(String),

    /// The stop signal was raised while a generation was in progress.
    #[error("Evolution cancelled")]
    Cancelled,

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for string evolution operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use strevolve::error::ResultExt;
///
/// fn parse_seed(raw: &str) -> strevolve::error::Result<u64> {
///     raw.parse::<u64>().context("Invalid seed")
/// }
///
/// assert!(parse_seed("forty-two").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Adds context to an error, converting it into `GeneticError::Other`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using
    /// a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Turns the payload of a caught panic into a `WorkerPanic` error.
pub(crate) fn panic_to_error(payload: Box<dyn std::any::Any + Send>) -> GeneticError {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    GeneticError::WorkerPanic(message)
}
