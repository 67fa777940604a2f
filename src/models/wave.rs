//! Wave (candidate solution) model.
//!
//! A wave is a pair of sets: the selected orders and the aisles visited to
//! pick them. Feasibility is not enforced by construction; use
//! [`Evaluator`](crate::evaluation::Evaluator) to check it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A candidate wave: selected orders and visited aisles.
///
/// The empty wave is the explicit "no feasible wave found" answer and must
/// not be read as a zero-objective success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wave {
    /// Selected order indices.
    pub orders: BTreeSet<usize>,
    /// Visited aisle indices.
    pub aisles: BTreeSet<usize>,
}

/// A constraint violated by a wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Human-readable description.
    pub message: String,
}

/// Classification of wave violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// No orders or no aisles selected.
    EmptyWave,
    /// An order index is outside the instance.
    UnknownOrder(usize),
    /// An aisle index is outside the instance.
    UnknownAisle(usize),
    /// Total units below the lower wave bound.
    BelowLowerBound,
    /// Total units above the upper wave bound.
    AboveUpperBound,
    /// Picked quantity of an item exceeds stock in the visited aisles.
    StockShortage {
        /// Item id.
        item: usize,
    },
}

impl Violation {
    /// Creates a violation.
    pub fn new(violation_type: ViolationType, message: impl Into<String>) -> Self {
        Self {
            violation_type,
            message: message.into(),
        }
    }

    /// Creates a stock shortage violation.
    pub fn stock_shortage(item: usize, picked: u64, available: u64) -> Self {
        Self::new(
            ViolationType::StockShortage { item },
            format!("Item {item}: picked {picked} > available {available}"),
        )
    }
}

impl Wave {
    /// Creates a wave from order and aisle indices.
    pub fn new(
        orders: impl IntoIterator<Item = usize>,
        aisles: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            orders: orders.into_iter().collect(),
            aisles: aisles.into_iter().collect(),
        }
    }

    /// The explicit empty (failure) wave.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether both sets are empty.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty() && self.aisles.is_empty()
    }

    /// Whether either set is empty (such a wave is never feasible).
    pub fn is_degenerate(&self) -> bool {
        self.orders.is_empty() || self.aisles.is_empty()
    }

    /// Number of selected orders.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of visited aisles.
    pub fn aisle_count(&self) -> usize {
        self.aisles.len()
    }

    /// Whether `order` is selected.
    pub fn contains_order(&self, order: usize) -> bool {
        self.orders.contains(&order)
    }

    /// Whether `aisle` is visited.
    pub fn visits_aisle(&self, aisle: usize) -> bool {
        self.aisles.contains(&aisle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_wave() {
        let w = Wave::empty();
        assert!(w.is_empty());
        assert!(w.is_degenerate());
        assert_eq!(w.order_count(), 0);
    }

    #[test]
    fn test_wave_dedups_and_sorts() {
        let w = Wave::new([3, 1, 3], [2, 0]);
        assert_eq!(w.orders.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert!(w.contains_order(3));
        assert!(w.visits_aisle(0));
        assert!(!w.is_degenerate());
    }

    #[test]
    fn test_half_empty_wave_is_degenerate() {
        let w = Wave::new([0], []);
        assert!(!w.is_empty());
        assert!(w.is_degenerate());
    }

    #[test]
    fn test_stock_shortage_message() {
        let v = Violation::stock_shortage(4, 6, 5);
        assert_eq!(v.violation_type, ViolationType::StockShortage { item: 4 });
        assert!(v.message.contains("Item 4"));
    }
}
