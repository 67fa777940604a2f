//! Wave quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total units | Units requested by the selected orders |
//! | Objective | Total units / visited aisles |
//! | Fill ratio | Total units / upper wave bound |
//! | Lower slack | Total units - lower bound (negative if under-filled) |
//! | Upper slack | Upper bound - total units (negative if over-filled) |
//! | Stock utilization | Total units / stock held in visited aisles |

use crate::models::{Instance, Wave};

use super::Evaluator;

/// Wave performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveKpi {
    /// Total picked units.
    pub total_units: u64,
    /// Number of selected orders.
    pub order_count: usize,
    /// Number of visited aisles.
    pub aisle_count: usize,
    /// Units per visited aisle (0.0 for degenerate waves).
    pub objective: f64,
    /// Fraction of the upper bound used (0.0 if the bound is 0).
    pub fill_ratio: f64,
    /// Distance above the lower bound.
    pub lower_slack: i64,
    /// Distance below the upper bound.
    pub upper_slack: i64,
    /// Fraction of visited-aisle stock that is picked (0.0 with no stock).
    pub stock_utilization: f64,
    /// Whether the wave passed the feasibility check.
    pub feasible: bool,
}

impl WaveKpi {
    /// Computes KPIs for a wave.
    pub fn calculate(instance: &Instance, wave: &Wave) -> Self {
        let eval = Evaluator::new(instance);
        let total_units = eval.picked_units(wave);
        let bounds = instance.bounds;

        let visited_stock: u64 = wave
            .aisles
            .iter()
            .filter_map(|&a| instance.aisles.get(a))
            .map(|a| a.total_units())
            .sum();

        let fill_ratio = if bounds.upper == 0 {
            0.0
        } else {
            total_units as f64 / bounds.upper as f64
        };
        let stock_utilization = if visited_stock == 0 {
            0.0
        } else {
            total_units as f64 / visited_stock as f64
        };

        Self {
            total_units,
            order_count: wave.order_count(),
            aisle_count: wave.aisle_count(),
            objective: eval.objective(wave),
            fill_ratio,
            lower_slack: signed_diff(total_units, bounds.lower),
            upper_slack: signed_diff(bounds.upper, total_units),
            stock_utilization,
            feasible: eval.is_feasible(wave),
        }
    }

    /// Whether the wave is feasible and meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_objective: f64, min_fill_ratio: f64) -> bool {
        self.feasible && self.objective >= min_objective && self.fill_ratio >= min_fill_ratio
    }
}

fn signed_diff(a: u64, b: u64) -> i64 {
    if a >= b {
        i64::try_from(a - b).unwrap_or(i64::MAX)
    } else {
        i64::try_from(b - a).map_or(i64::MIN, |d| -d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Aisle, Order};

    fn sample_instance() -> Instance {
        Instance::new(2, 5, 10)
            .with_order(Order::new().with_item(0, 3))
            .with_order(Order::new().with_item(1, 4))
            .with_aisle(Aisle::new().with_stock(0, 5).with_stock(1, 5))
            .with_aisle(Aisle::new().with_stock(1, 10))
    }

    #[test]
    fn test_kpi_basic() {
        let instance = sample_instance();
        let kpi = WaveKpi::calculate(&instance, &Wave::new([0, 1], [0]));
        assert_eq!(kpi.total_units, 7);
        assert_eq!(kpi.order_count, 2);
        assert_eq!(kpi.aisle_count, 1);
        assert!((kpi.objective - 7.0).abs() < 1e-10);
        assert!((kpi.fill_ratio - 0.7).abs() < 1e-10);
        assert_eq!(kpi.lower_slack, 2);
        assert_eq!(kpi.upper_slack, 3);
        assert!((kpi.stock_utilization - 0.7).abs() < 1e-10);
        assert!(kpi.feasible);
    }

    #[test]
    fn test_kpi_under_filled() {
        let instance = sample_instance();
        let kpi = WaveKpi::calculate(&instance, &Wave::new([0], [0, 1]));
        assert_eq!(kpi.lower_slack, -2);
        assert!(!kpi.feasible);
        assert!((kpi.stock_utilization - 0.15).abs() < 1e-10); // 3 / 20
    }

    #[test]
    fn test_kpi_empty() {
        let instance = sample_instance();
        let kpi = WaveKpi::calculate(&instance, &Wave::empty());
        assert_eq!(kpi.total_units, 0);
        assert_eq!(kpi.objective, 0.0);
        assert_eq!(kpi.stock_utilization, 0.0);
        assert!(!kpi.feasible);
    }

    #[test]
    fn test_meets_thresholds() {
        let instance = sample_instance();
        let kpi = WaveKpi::calculate(&instance, &Wave::new([0, 1], [0]));
        assert!(kpi.meets_thresholds(7.0, 0.5));
        assert!(!kpi.meets_thresholds(7.5, 0.5));
        assert!(!kpi.meets_thresholds(1.0, 0.8));
    }
}
