//! # Individual
//!
//! An `Individual` is one candidate string plus the fitness the ranking stage
//! cached for it. Fitness is a cost: lower is better and zero is an exact
//! match. A freshly bred individual has no fitness until it is ranked.
//!
//! ```rust
//! use strevolve::individual::Individual;
//!
//! let fresh = Individual::new(b"hello".to_vec());
//! assert_eq!(fresh.fitness(), None);
//!
//! let ranked = Individual::with_fitness(b"hello".to_vec(), 512.0);
//! assert_eq!(ranked.fitness(), Some(512.0));
//! assert_eq!(ranked.len(), 5);
//! ```

use std::borrow::Cow;

use crate::error::{GeneticError, Result};

/// A candidate byte string and its cached fitness.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    data: Vec<u8>,
    fitness: Option<f64>,
}

impl Individual {
    /// Creates an unranked individual.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            fitness: None,
        }
    }

    /// Creates an individual whose fitness is already known.
    pub fn with_fitness(data: Vec<u8>, fitness: f64) -> Self {
        Self {
            data,
            fitness: Some(fitness),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The cached fitness, or `None` before the first ranking.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// The cached fitness of an individual that must already be ranked.
    pub fn ranked_fitness(&self) -> Result<f64> {
        self.fitness.ok_or_else(|| {
            GeneticError::InvariantViolation(format!(
                "Individual {:?} has not been ranked",
                self.as_lossy_str()
            ))
        })
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// The candidate as text, with invalid UTF-8 replaced.
    pub fn as_lossy_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}
