//! Stock-aware greedy wave constructor.
//!
//! # Algorithm
//!
//! 1. Profile every order and rank the profiles (density by default).
//! 2. Walk the ranking once. Skip any order that would push the wave past
//!    the upper bound; a later, smaller order may still fit.
//! 3. Check per-item coverage against the stock unlocked so far, widening
//!    to the aisles stocking an item only when the unlocked stock falls short.
//! 4. On acceptance, commit the order's aisles and unlock their stock.
//! 5. Report the empty wave when the lower bound is not reached.
//!
//! # Complexity
//! O(n log n + Σ touched aisles) where n = orders.

use log::debug;

use super::RunningAccumulators;
use crate::evaluation::ItemAisleIndex;
use crate::models::{Instance, Wave};
use crate::monitor::TimeBudget;
use crate::ranking::{profile_orders, RankingEngine};

/// Single-pass, no-backtracking wave constructor.
///
/// Every non-empty wave it returns satisfies both wave bounds and per-item
/// stock over its committed aisles.
///
/// # Example
///
/// ```
/// use u_wave::evaluation::{Evaluator, ItemAisleIndex};
/// use u_wave::greedy::GreedyConstructor;
/// use u_wave::models::{Aisle, Instance, Order};
/// use u_wave::monitor::TimeBudget;
///
/// let instance = Instance::new(2, 5, 10)
///     .with_order(Order::new().with_item(0, 3))
///     .with_order(Order::new().with_item(1, 4))
///     .with_aisle(Aisle::new().with_stock(0, 5).with_stock(1, 5));
/// let index = ItemAisleIndex::build(&instance.aisles);
///
/// let wave = GreedyConstructor::new().construct(&instance, &index, &TimeBudget::unlimited());
/// assert_eq!(wave.order_count(), 2);
/// assert!(Evaluator::new(&instance).is_feasible(&wave));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyConstructor {
    ranking: RankingEngine,
}

impl GreedyConstructor {
    /// Creates a constructor using density ranking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ranking engine that orders candidates.
    pub fn with_ranking(mut self, ranking: RankingEngine) -> Self {
        self.ranking = ranking;
        self
    }

    /// The ranking engine in use.
    pub fn ranking(&self) -> &RankingEngine {
        &self.ranking
    }

    /// Builds a wave for `instance`.
    ///
    /// Returns [`Wave::empty`] when no order is selected or the accepted
    /// units stay below the lower bound. On budget exhaustion the pass stops
    /// and the same termination rule applies to what was accepted.
    pub fn construct(&self, instance: &Instance, index: &ItemAisleIndex, budget: &TimeBudget) -> Wave {
        let ranked = self.ranking.rank(&profile_orders(instance, index));
        debug!("greedy: {} ranked orders", ranked.len());

        let bounds = instance.bounds;
        let mut acc = RunningAccumulators::new(instance.item_span(), instance.aisle_count());
        let mut selected = Vec::new();

        for (step, profile) in ranked.iter().enumerate() {
            if budget.poll(step as u64 + 1) {
                debug!("greedy: budget exhausted after {step} orders");
                break;
            }
            if !acc.fits_upper(profile.units, bounds.upper) {
                continue;
            }

            let order = &instance.orders[profile.order];
            if !acc.can_cover(order, &instance.aisles, index) {
                continue;
            }
            acc.accept(order, &instance.aisles, index);
            selected.push(profile.order);
        }

        if selected.is_empty() || acc.total_units() < bounds.lower {
            debug!(
                "greedy: no wave ({} orders, {} units, lower bound {})",
                selected.len(),
                acc.total_units(),
                bounds.lower
            );
            return Wave::empty();
        }

        debug!(
            "greedy: {} orders, {} units, {} aisles",
            selected.len(),
            acc.total_units(),
            acc.committed_count()
        );
        Wave::new(selected, acc.committed_aisles())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::evaluation::Evaluator;
    use crate::models::{Aisle, Order};
    use crate::ranking::rules;

    fn construct(instance: &Instance) -> Wave {
        let index = ItemAisleIndex::build(&instance.aisles);
        GreedyConstructor::new().construct(instance, &index, &TimeBudget::unlimited())
    }

    fn two_order_instance(lower: u64, upper: u64) -> Instance {
        Instance::new(2, lower, upper)
            .with_order(Order::new().with_item(0, 3))
            .with_order(Order::new().with_item(1, 4))
            .with_aisle(Aisle::new().with_stock(0, 5).with_stock(1, 5))
    }

    #[test]
    fn test_both_orders_one_aisle() {
        let instance = two_order_instance(5, 10);
        let wave = construct(&instance);

        assert_eq!(wave.orders.iter().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(wave.aisles.iter().copied().collect::<Vec<_>>(), vec![0]);
        let eval = Evaluator::new(&instance);
        assert!(eval.is_feasible(&wave));
        assert!((eval.objective(&wave) - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_upper_bound_below_lower_bound_gives_empty() {
        let wave = construct(&two_order_instance(5, 3));
        assert!(wave.is_empty());
    }

    #[test]
    fn test_single_order_when_lower_bound_allows() {
        let instance = two_order_instance(3, 3);
        let wave = construct(&instance);
        assert_eq!(wave.orders.iter().copied().collect::<Vec<_>>(), vec![0]);
        assert!(Evaluator::new(&instance).is_feasible(&wave));
    }

    #[test]
    fn test_oversized_order_skipped_not_terminating() {
        // order 0 ranks first (densest) but exceeds the upper bound
        let instance = Instance::new(2, 1, 5)
            .with_order(Order::new().with_item(0, 9))
            .with_order(Order::new().with_item(1, 2))
            .with_aisle(Aisle::new().with_stock(0, 9))
            .with_aisle(Aisle::new().with_stock(1, 2));
        let wave = construct(&instance);
        assert_eq!(wave.orders.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(wave.aisles.iter().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_stock_shortage_rejects_order() {
        let instance = Instance::new(1, 1, 100)
            .with_order(Order::new().with_item(0, 4))
            .with_order(Order::new().with_item(0, 4))
            .with_aisle(Aisle::new().with_stock(0, 6));
        let wave = construct(&instance);
        assert_eq!(wave.order_count(), 1);
        assert!(Evaluator::new(&instance).is_feasible(&wave));
    }

    #[test]
    fn test_split_supply_across_aisles() {
        let instance = Instance::new(1, 5, 10)
            .with_order(Order::new().with_item(0, 5))
            .with_aisle(Aisle::new().with_stock(0, 3))
            .with_aisle(Aisle::new().with_stock(0, 2));
        let wave = construct(&instance);
        assert_eq!(wave.aisle_count(), 2);
        assert!(Evaluator::new(&instance).is_feasible(&wave));
    }

    #[test]
    fn test_unstocked_item_rejected() {
        let instance = Instance::new(2, 1, 10)
            .with_order(Order::new().with_item(1, 1))
            .with_aisle(Aisle::new().with_stock(0, 5));
        assert!(construct(&instance).is_empty());
    }

    #[test]
    fn test_degenerate_instances_return_empty() {
        assert!(construct(&Instance::new(0, 0, 10)).is_empty());

        let no_aisles = Instance::new(1, 0, 10).with_order(Order::new().with_item(0, 1));
        assert!(construct(&no_aisles).is_empty());

        // zero lower bound with nothing selectable still yields the empty wave
        let zero_lb = Instance::new(1, 0, 10).with_aisle(Aisle::new().with_stock(0, 1));
        assert!(construct(&zero_lb).is_empty());
    }

    #[test]
    fn test_zero_lower_bound_with_orders() {
        let instance = two_order_instance(0, 10);
        let wave = construct(&instance);
        assert_eq!(wave.order_count(), 2);
    }

    #[test]
    fn test_largest_first_ranking() {
        // density prefers order 1 (4 units / 1 aisle); largest-first takes order 0
        let instance = Instance::new(2, 1, 6)
            .with_order(Order::new().with_item(0, 6))
            .with_order(Order::new().with_item(1, 4))
            .with_aisle(Aisle::new().with_stock(0, 3))
            .with_aisle(Aisle::new().with_stock(0, 3))
            .with_aisle(Aisle::new().with_stock(1, 4));
        let index = ItemAisleIndex::build(&instance.aisles);

        let density = GreedyConstructor::new().construct(&instance, &index, &TimeBudget::unlimited());
        assert_eq!(density.orders.iter().copied().collect::<Vec<_>>(), vec![1]);

        let largest = GreedyConstructor::new()
            .with_ranking(RankingEngine::new().with_rule(rules::LargestFirst))
            .construct(&instance, &index, &TimeBudget::unlimited());
        assert_eq!(largest.orders.iter().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_exhausted_budget_stops_pass() {
        let instance = two_order_instance(1, 10);
        let index = ItemAisleIndex::build(&instance.aisles);
        let expired = TimeBudget::starting_at(
            Instant::now() - Duration::from_millis(50),
            Duration::from_millis(1),
        )
        .with_clock_check_mask(0);
        let wave = GreedyConstructor::new().construct(&instance, &index, &expired);
        assert!(wave.is_empty());
    }
}
