//! Order-wave selection for warehouse picking.
//!
//! Given orders, aisle stock, and a window `[LB, UB]` on total picked
//! units, selects a wave (a subset of orders plus the aisles visited to
//! supply them) that maximizes units picked per visited aisle, while every
//! item's picked quantity stays within the stock of the visited aisles.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Order`, `Aisle`, `Instance`, `WaveBounds`, `Wave`
//! - **`evaluation`**: Item→aisle index, exact feasibility and objective, KPIs
//! - **`ranking`**: Order profiles and composable ranking rules (density by default)
//! - **`greedy`**: Stock-aware single-pass constructor
//! - **`ga`**: Bit-vector genetic refinement
//! - **`monitor`**: Wall-clock budget with cooperative polling
//! - **`solver`**: Strategy selection and the `solve` entry point
//! - **`validation`**: Input integrity checks for instance loaders
//!
//! # Example
//!
//! ```
//! use u_wave::evaluation::Evaluator;
//! use u_wave::models::{Aisle, Instance, Order};
//! use u_wave::monitor::TimeBudget;
//! use u_wave::solver::{SolverConfig, WaveSolver};
//!
//! let instance = Instance::new(2, 5, 10)
//!     .with_order(Order::new().with_item(0, 3))
//!     .with_order(Order::new().with_item(1, 4))
//!     .with_aisle(Aisle::new().with_stock(0, 5).with_stock(1, 5));
//!
//! let solver = WaveSolver::new(SolverConfig::default()).unwrap();
//! let result = solver.solve(&instance, &TimeBudget::challenge_default());
//! assert!(Evaluator::new(&instance).is_feasible(&result.wave));
//! ```
//!
//! # References
//!
//! - SBPO 2025 Optimization Challenge, "Wave order picking"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"

pub mod error;
pub mod evaluation;
pub mod ga;
pub mod greedy;
pub mod models;
pub mod monitor;
pub mod ranking;
pub mod solver;
pub mod validation;

pub use error::ConfigError;
pub use evaluation::Evaluator;
pub use models::{Instance, Wave};
pub use monitor::TimeBudget;
pub use solver::{SolveResult, SolveStatus, SolverConfig, Strategy, WaveSolver};
