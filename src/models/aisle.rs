//! Warehouse aisle model.
//!
//! An aisle holds stock for a set of items. Visiting an aisle makes all
//! of its stock available to the wave.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A warehouse aisle: item → available quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aisle {
    /// Available quantity per item id.
    pub stock: BTreeMap<usize, u32>,
}

impl Aisle {
    /// Creates an empty aisle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or accumulates) stock for an item. Zero quantities are ignored.
    pub fn with_stock(mut self, item: usize, quantity: u32) -> Self {
        if quantity > 0 {
            *self.stock.entry(item).or_insert(0) += quantity;
        }
        self
    }

    /// Builds an aisle from `(item, quantity)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, u32)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::new(), |aisle, (item, qty)| aisle.with_stock(item, qty))
    }

    /// Available quantity of `item` (0 if not stocked).
    pub fn quantity(&self, item: usize) -> u32 {
        self.stock.get(&item).copied().unwrap_or(0)
    }

    /// Whether this aisle holds a positive quantity of `item`.
    pub fn stocks(&self, item: usize) -> bool {
        self.quantity(item) > 0
    }

    /// Total units held.
    pub fn total_units(&self) -> u64 {
        self.stock.values().map(|&q| u64::from(q)).sum()
    }

    /// Iterates `(item, quantity)` in ascending item order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.stock.iter().map(|(&item, &qty)| (item, qty))
    }

    /// Whether the aisle holds nothing.
    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aisle_builder() {
        let aisle = Aisle::new().with_stock(0, 5).with_stock(1, 5);
        assert_eq!(aisle.quantity(0), 5);
        assert!(aisle.stocks(1));
        assert!(!aisle.stocks(2));
        assert_eq!(aisle.total_units(), 10);
    }

    #[test]
    fn test_aisle_zero_stock() {
        let aisle = Aisle::from_pairs([(0, 0), (1, 2)]);
        assert!(!aisle.stocks(0));
        assert_eq!(aisle.iter().count(), 1);
    }
}
