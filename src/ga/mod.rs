//! GA-based wave refinement.
//!
//! Bridges wave selection to the generic GA framework of `u_metaheur`:
//! [`WaveGaProblem`] implements `u_metaheur::ga::GaProblem`, and
//! [`GaConfig`] maps the wave GA settings onto the runner's parameters.
//!
//! # Encoding
//!
//! One bit per order ([`OrderChromosome`]). The visited aisles are derived
//! when decoding, so every chromosome stays the same length for the whole
//! run.
//!
//! # Submodules
//!
//! - [`operators`]: Runtime-selectable crossover and mutation strategies
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning", Ch. 1-3

mod chromosome;
mod config;
pub mod operators;
mod problem;

pub use chromosome::{
    bit_flip_mutation, exchange_mutation, one_point_crossover, repair_lower_bound,
    uniform_crossover, OrderChromosome,
};
pub use config::GaConfig;
pub use problem::{WaveGaProblem, INFEASIBLE_FITNESS};
