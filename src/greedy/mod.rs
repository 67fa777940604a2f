//! Stock-aware greedy wave construction.
//!
//! [`GreedyConstructor`] makes one ranked pass over the orders and accepts
//! each order whose items can be covered by the aisles committed so far
//! (widened on demand). [`RunningAccumulators`] carries the incremental
//! stock bookkeeping so that no order check rescans the full aisle set.
//!
//! The constructor is the reliable baseline: every non-empty wave it
//! returns is feasible.

mod accumulators;
mod constructor;

pub use accumulators::RunningAccumulators;
pub use constructor::GreedyConstructor;
