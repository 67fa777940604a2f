//! Order ranking rules and rule engine.
//!
//! Orders are profiled once per solve ([`OrderProfile`]) and ranked by a
//! composable [`RankingEngine`]. The default engine ranks by density
//! (units per required aisle), the score the greedy constructor relies on.
//!
//! # Usage
//!
//! ```
//! use u_wave::ranking::{rules, RankingEngine};
//!
//! let engine = RankingEngine::new()
//!     .with_rule(rules::Density)
//!     .with_tie_breaker(rules::LargestFirst);
//! ```

mod engine;
pub mod rules;

pub use engine::{EvaluationMode, RankingEngine};

use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::evaluation::ItemAisleIndex;
use crate::models::Instance;

/// Score returned by a ranking rule.
///
/// Lower scores = ranked earlier.
pub type RuleScore = f64;

/// Static per-order data used for ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderProfile {
    /// Order index in the instance.
    pub order: usize,
    /// Total requested units.
    pub units: u64,
    /// Size of the union of aisles stocking any requested item.
    pub required_aisles: usize,
}

impl OrderProfile {
    /// Units per required aisle.
    ///
    /// An order needing no aisle (no stocked items) is degenerate; it gets
    /// `f64::MAX` as a sentinel instead of dividing by zero.
    pub fn density(&self) -> f64 {
        if self.required_aisles > 0 {
            self.units as f64 / self.required_aisles as f64
        } else {
            f64::MAX
        }
    }
}

/// Profiles every order with positive units, in order-index order.
///
/// Orders with zero units are dropped: they contribute nothing and cannot
/// violate any bound.
pub fn profile_orders(instance: &Instance, index: &ItemAisleIndex) -> Vec<OrderProfile> {
    instance
        .orders
        .iter()
        .enumerate()
        .filter_map(|(order_idx, order)| {
            let units = order.units();
            if units == 0 {
                return None;
            }
            let required: BTreeSet<usize> = order
                .iter()
                .flat_map(|(item, _)| index.aisles_for(item).iter().copied())
                .collect();
            Some(OrderProfile {
                order: order_idx,
                units,
                required_aisles: required.len(),
            })
        })
        .collect()
}

/// A rule that scores an order profile for ranking.
///
/// # Score Convention
/// **Lower score = ranked earlier.**
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name (e.g., "DENSITY").
    fn name(&self) -> &'static str;

    /// Scores an order. Lower = earlier.
    fn evaluate(&self, profile: &OrderProfile) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Aisle, Order};

    #[test]
    fn test_profile_orders() {
        let instance = Instance::new(3, 0, 100)
            .with_order(Order::new().with_item(0, 2).with_item(1, 2))
            .with_order(Order::new())
            .with_order(Order::new().with_item(2, 1))
            .with_aisle(Aisle::new().with_stock(0, 5))
            .with_aisle(Aisle::new().with_stock(0, 5).with_stock(1, 5));
        let index = ItemAisleIndex::build(&instance.aisles);

        let profiles = profile_orders(&instance, &index);
        assert_eq!(profiles.len(), 2); // empty order dropped
        assert_eq!(profiles[0].order, 0);
        assert_eq!(profiles[0].units, 4);
        assert_eq!(profiles[0].required_aisles, 2); // union, not sum
        assert!((profiles[0].density() - 2.0).abs() < 1e-10);

        // item 2 is stocked nowhere
        assert_eq!(profiles[1].order, 2);
        assert_eq!(profiles[1].required_aisles, 0);
        assert_eq!(profiles[1].density(), f64::MAX);
    }
}
