//! Configuration errors.
//!
//! Algorithmic failure (no wave reaching the lower bound) is reported as
//! data through [`Wave::empty`](crate::models::Wave::empty) and
//! [`SolveStatus`](crate::solver::SolveStatus). Only invalid solver
//! configuration is an error.

use thiserror::Error;

/// Invalid solver or genetic-algorithm configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Fewer than two individuals per generation.
    #[error("population size must be at least 2, got {population_size}")]
    PopulationTooSmall {
        /// Configured population size.
        population_size: usize,
    },
    /// No generation would be bred.
    #[error("max generations must be at least 1")]
    NoGenerations,
    /// Tournament size is zero.
    #[error("tournament size must be at least 1")]
    EmptyTournament,
    /// A probability is outside `[0, 1]` or not a number.
    #[error("{name} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// Name of the offending setting.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Elitism would fill the whole population.
    #[error("elite count {elite_count} must be smaller than population size {population_size}")]
    TooManyElites {
        /// Configured elite count.
        elite_count: usize,
        /// Configured population size.
        population_size: usize,
    },
}
