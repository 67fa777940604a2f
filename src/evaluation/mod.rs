//! Feasibility and objective evaluation.
//!
//! Pure functions over a finalized wave and its instance:
//!
//! - [`Evaluator::is_feasible`]: wave bounds and per-item stock hold.
//! - [`Evaluator::objective`]: picked units per visited aisle.
//! - [`Evaluator::audit`]: every violated constraint, for diagnostics.
//!
//! Also hosts the item → aisle index ([`ItemAisleIndex`]) and the wave
//! KPIs ([`WaveKpi`]).

mod index;
mod kpi;

pub use index::ItemAisleIndex;
pub use kpi::WaveKpi;

use crate::models::{Instance, Violation, ViolationType, Wave};

/// Per-item picked and available quantities for one wave.
#[derive(Debug, Clone)]
struct ItemTally {
    picked: Vec<u64>,
    available: Vec<u64>,
    total_picked: u64,
}

/// Scores and checks waves against an instance.
///
/// # Example
/// ```
/// use u_wave::evaluation::Evaluator;
/// use u_wave::models::{Aisle, Instance, Order, Wave};
///
/// let instance = Instance::new(2, 5, 10)
///     .with_order(Order::new().with_item(0, 3))
///     .with_order(Order::new().with_item(1, 4))
///     .with_aisle(Aisle::new().with_stock(0, 5).with_stock(1, 5));
/// let eval = Evaluator::new(&instance);
/// let wave = Wave::new([0, 1], [0]);
/// assert!(eval.is_feasible(&wave));
/// assert!((eval.objective(&wave) - 7.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    instance: &'a Instance,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator bound to `instance`.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// The instance under evaluation.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Whether the wave is feasible.
    ///
    /// Rejects degenerate waves and out-of-range indices, then checks the
    /// wave-size window and that no item is picked beyond the stock held in
    /// the visited aisles.
    pub fn is_feasible(&self, wave: &Wave) -> bool {
        if wave.is_degenerate() || !self.indices_in_range(wave) {
            return false;
        }
        let tally = self.tally(wave);
        if !self.instance.bounds.contains(tally.total_picked) {
            return false;
        }
        tally
            .picked
            .iter()
            .zip(&tally.available)
            .all(|(picked, available)| picked <= available)
    }

    /// Objective: total picked units / number of visited aisles.
    ///
    /// Returns 0.0 for degenerate waves. Feasibility is not checked; pair
    /// with [`is_feasible`](Self::is_feasible).
    pub fn objective(&self, wave: &Wave) -> f64 {
        if wave.is_degenerate() {
            return 0.0;
        }
        self.picked_units(wave) as f64 / wave.aisle_count() as f64
    }

    /// Total units requested by the selected orders. Unknown orders count 0.
    pub fn picked_units(&self, wave: &Wave) -> u64 {
        wave.orders
            .iter()
            .filter_map(|&o| self.instance.orders.get(o))
            .map(|o| o.units())
            .sum()
    }

    /// Lists every violated constraint. Empty iff the wave is feasible.
    pub fn audit(&self, wave: &Wave) -> Vec<Violation> {
        let mut violations = Vec::new();

        if wave.is_degenerate() {
            violations.push(Violation::new(
                ViolationType::EmptyWave,
                format!(
                    "Wave has {} orders and {} aisles",
                    wave.order_count(),
                    wave.aisle_count()
                ),
            ));
        }

        for &o in wave.orders.iter().filter(|&&o| o >= self.instance.order_count()) {
            violations.push(Violation::new(
                ViolationType::UnknownOrder(o),
                format!("Order {o} is not part of the instance"),
            ));
        }
        for &a in wave.aisles.iter().filter(|&&a| a >= self.instance.aisle_count()) {
            violations.push(Violation::new(
                ViolationType::UnknownAisle(a),
                format!("Aisle {a} is not part of the instance"),
            ));
        }

        let tally = self.tally(wave);
        let bounds = self.instance.bounds;
        if tally.total_picked < bounds.lower {
            violations.push(Violation::new(
                ViolationType::BelowLowerBound,
                format!("Wave size {} < lower bound {}", tally.total_picked, bounds.lower),
            ));
        }
        if tally.total_picked > bounds.upper {
            violations.push(Violation::new(
                ViolationType::AboveUpperBound,
                format!("Wave size {} > upper bound {}", tally.total_picked, bounds.upper),
            ));
        }

        for (item, (&picked, &available)) in tally.picked.iter().zip(&tally.available).enumerate() {
            if picked > available {
                violations.push(Violation::stock_shortage(item, picked, available));
            }
        }

        violations
    }

    fn indices_in_range(&self, wave: &Wave) -> bool {
        let orders_ok = wave
            .orders
            .iter()
            .next_back()
            .map_or(true, |&o| o < self.instance.order_count());
        let aisles_ok = wave
            .aisles
            .iter()
            .next_back()
            .map_or(true, |&a| a < self.instance.aisle_count());
        orders_ok && aisles_ok
    }

    fn tally(&self, wave: &Wave) -> ItemTally {
        let span = self.instance.item_span();
        let mut picked = vec![0u64; span];
        let mut available = vec![0u64; span];
        let mut total_picked = 0u64;

        for order in wave.orders.iter().filter_map(|&o| self.instance.orders.get(o)) {
            for (item, qty) in order.iter() {
                picked[item] += u64::from(qty);
                total_picked += u64::from(qty);
            }
        }
        for aisle in wave.aisles.iter().filter_map(|&a| self.instance.aisles.get(a)) {
            for (item, qty) in aisle.iter() {
                available[item] += u64::from(qty);
            }
        }

        ItemTally {
            picked,
            available,
            total_picked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Aisle, Order};
    use rstest::rstest;

    fn two_item_instance(lb: u64, ub: u64) -> Instance {
        Instance::new(2, lb, ub)
            .with_order(Order::new().with_item(0, 3))
            .with_order(Order::new().with_item(1, 4))
            .with_aisle(Aisle::new().with_stock(0, 5).with_stock(1, 5))
    }

    #[test]
    fn test_feasible_wave() {
        let instance = two_item_instance(5, 10);
        let eval = Evaluator::new(&instance);
        let wave = Wave::new([0, 1], [0]);
        assert!(eval.is_feasible(&wave));
        assert!(eval.audit(&wave).is_empty());
        assert_eq!(eval.picked_units(&wave), 7);
        assert!((eval.objective(&wave) - 7.0).abs() < 1e-10);
    }

    #[rstest]
    #[case::below_lower(Wave::new([0], [0]), ViolationType::BelowLowerBound)]
    #[case::empty(Wave::empty(), ViolationType::EmptyWave)]
    #[case::no_aisles(Wave::new([0, 1], []), ViolationType::EmptyWave)]
    #[case::unknown_order(Wave::new([0, 1, 7], [0]), ViolationType::UnknownOrder(7))]
    #[case::unknown_aisle(Wave::new([0, 1], [0, 3]), ViolationType::UnknownAisle(3))]
    fn test_infeasible_waves(#[case] wave: Wave, #[case] expected: ViolationType) {
        let instance = two_item_instance(5, 10);
        let eval = Evaluator::new(&instance);
        assert!(!eval.is_feasible(&wave));
        assert!(eval
            .audit(&wave)
            .iter()
            .any(|v| v.violation_type == expected));
    }

    #[test]
    fn test_above_upper_bound() {
        let instance = two_item_instance(0, 6);
        let eval = Evaluator::new(&instance);
        let wave = Wave::new([0, 1], [0]);
        assert!(!eval.is_feasible(&wave));
        let violations = eval.audit(&wave);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::AboveUpperBound);
    }

    #[test]
    fn test_stock_shortage() {
        let instance = Instance::new(1, 0, 100)
            .with_order(Order::new().with_item(0, 4))
            .with_order(Order::new().with_item(0, 4))
            .with_aisle(Aisle::new().with_stock(0, 5))
            .with_aisle(Aisle::new().with_stock(0, 3));
        let eval = Evaluator::new(&instance);

        let one_aisle = Wave::new([0, 1], [0]);
        assert!(!eval.is_feasible(&one_aisle));
        assert_eq!(
            eval.audit(&one_aisle)[0].violation_type,
            ViolationType::StockShortage { item: 0 }
        );

        // stock is aggregated across visited aisles
        let both = Wave::new([0, 1], [0, 1]);
        assert!(eval.is_feasible(&both));
        assert!((eval.objective(&both) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_objective_of_degenerate_wave() {
        let instance = two_item_instance(5, 10);
        let eval = Evaluator::new(&instance);
        assert_eq!(eval.objective(&Wave::empty()), 0.0);
        assert_eq!(eval.objective(&Wave::new([0], [])), 0.0);
    }

    #[test]
    fn test_objective_ignores_unknown_orders() {
        let instance = two_item_instance(5, 10);
        let eval = Evaluator::new(&instance);
        let wave = Wave::new([0, 42], [0]);
        assert_eq!(eval.picked_units(&wave), 3);
    }
}
