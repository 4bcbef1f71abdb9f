//! # Population
//!
//! The ordered set of individuals alive in one generation. The launcher owns
//! exactly one current population; breeding builds the next one and the
//! launcher swaps it in.

use std::ops::Index;

use crate::individual::Individual;

/// An ordered collection of individuals.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    pub fn as_slice(&self) -> &[Individual] {
        &self.individuals
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub fn into_inner(self) -> Vec<Individual> {
        self.individuals
    }

    /// The first individual. After ranking this is the fittest one.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    /// Whether every individual carries a fitness and the order is
    /// ascending by fitness.
    pub fn is_ranked(&self) -> bool {
        self.individuals.iter().all(|i| i.fitness().is_some())
            && self
                .individuals
                .windows(2)
                .all(|pair| pair[0].fitness() <= pair[1].fitness())
    }
}

impl From<Vec<Individual>> for Population {
    fn from(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }
}

impl Extend<Individual> for Population {
    fn extend<T: IntoIterator<Item = Individual>>(&mut self, iter: T) {
        self.individuals.extend(iter);
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<T: IntoIterator<Item = Individual>>(iter: T) -> Self {
        Self {
            individuals: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
