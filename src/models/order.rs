//! Customer order model.
//!
//! An order requests positive quantities of a set of items. Items absent
//! from the map are not requested.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A customer order: item → requested quantity.
///
/// Backed by a `BTreeMap` so iteration is always in ascending item order,
/// which keeps every solver pass deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Requested quantity per item id.
    pub items: BTreeMap<usize, u32>,
}

impl Order {
    /// Creates an order with no items.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or accumulates) a requested quantity. Zero quantities are ignored.
    pub fn with_item(mut self, item: usize, quantity: u32) -> Self {
        if quantity > 0 {
            *self.items.entry(item).or_insert(0) += quantity;
        }
        self
    }

    /// Builds an order from `(item, quantity)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, u32)>) -> Self {
        pairs
            .into_iter()
            .fold(Self::new(), |order, (item, qty)| order.with_item(item, qty))
    }

    /// Requested quantity of `item` (0 if absent).
    pub fn quantity(&self, item: usize) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Total requested units.
    pub fn units(&self) -> u64 {
        self.items.values().map(|&q| u64::from(q)).sum()
    }

    /// Iterates `(item, quantity)` in ascending item order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.items.iter().map(|(&item, &qty)| (item, qty))
    }

    /// Number of distinct items requested.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the order requests nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_builder() {
        let order = Order::new().with_item(3, 2).with_item(1, 5);
        assert_eq!(order.quantity(3), 2);
        assert_eq!(order.quantity(1), 5);
        assert_eq!(order.quantity(7), 0);
        assert_eq!(order.units(), 7);
        assert_eq!(order.item_count(), 2);
    }

    #[test]
    fn test_order_iterates_in_item_order() {
        let order = Order::from_pairs([(9, 1), (2, 1), (5, 1)]);
        let items: Vec<usize> = order.iter().map(|(i, _)| i).collect();
        assert_eq!(items, vec![2, 5, 9]);
    }

    #[test]
    fn test_zero_quantity_ignored() {
        let order = Order::new().with_item(0, 0);
        assert!(order.is_empty());
        assert_eq!(order.units(), 0);
    }

    #[test]
    fn test_repeated_item_accumulates() {
        let order = Order::new().with_item(4, 2).with_item(4, 3);
        assert_eq!(order.quantity(4), 5);
        assert_eq!(order.item_count(), 1);
    }
}
