//! Configurable genetic operators for wave chromosomes.
//!
//! Provides runtime-selectable crossover and mutation strategies
//! via [`GeneticOperators`].
//!
//! # Usage
//!
//! ```
//! use u_wave::ga::operators::{GeneticOperators, CrossoverType, MutationType};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.crossover_type, CrossoverType::Uniform);
//! assert_eq!(ops.mutation_type, MutationType::BitFlip);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::{
    bit_flip_mutation, exchange_mutation, one_point_crossover, uniform_crossover, OrderChromosome,
};
use super::GaConfig;

/// Crossover strategy for order chromosomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverType {
    /// Each gene from either parent with equal probability.
    #[default]
    Uniform,
    /// Prefix from the first parent, suffix from the second.
    OnePoint,
}

/// Mutation strategy for order chromosomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationType {
    /// Flip each gene independently.
    #[default]
    BitFlip,
    /// Swap selected orders for unselected ones.
    Exchange,
}

/// Runtime-selectable genetic operators.
///
/// # Example
///
/// ```
/// use u_wave::ga::operators::{GeneticOperators, CrossoverType, MutationType};
///
/// let ops = GeneticOperators {
///     crossover_type: CrossoverType::OnePoint,
///     mutation_type: MutationType::Exchange,
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneticOperators {
    /// Crossover strategy.
    pub crossover_type: CrossoverType,
    /// Mutation strategy.
    pub mutation_type: MutationType,
}

impl GeneticOperators {
    /// Operators named by a run configuration.
    pub fn from_config(config: &GaConfig) -> Self {
        Self {
            crossover_type: config.crossover_type,
            mutation_type: config.mutation_type,
        }
    }

    /// Performs crossover using the configured strategy.
    pub fn crossover<R: Rng>(
        &self,
        p1: &OrderChromosome,
        p2: &OrderChromosome,
        rng: &mut R,
    ) -> OrderChromosome {
        match self.crossover_type {
            CrossoverType::Uniform => uniform_crossover(p1, p2, rng),
            CrossoverType::OnePoint => one_point_crossover(p1, p2, rng),
        }
    }

    /// Performs mutation using the configured strategy.
    pub fn mutate<R: Rng>(&self, chromosome: &mut OrderChromosome, rate: f64, rng: &mut R) {
        match self.mutation_type {
            MutationType::BitFlip => bit_flip_mutation(chromosome, rate, rng),
            MutationType::Exchange => exchange_mutation(chromosome, rate, rng),
        }
    }
}
