//! Incremental stock bookkeeping for the greedy pass.
//!
//! Tracks, for the orders accepted so far: total units, per-item required
//! quantity, the committed aisle set, and the per-item stock unlocked by
//! committed aisles. Aisles are only ever added and unlocked stock only
//! ever grows.

use std::collections::BTreeSet;

use crate::evaluation::ItemAisleIndex;
use crate::models::{Aisle, Order};

/// Running state of one greedy pass. Reset per solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningAccumulators {
    total_units: u64,
    required: Vec<u64>,
    available: Vec<u64>,
    committed: Vec<bool>,
    committed_count: usize,
}

impl RunningAccumulators {
    /// Empty state sized for `item_span` items and `aisle_count` aisles.
    pub fn new(item_span: usize, aisle_count: usize) -> Self {
        Self {
            total_units: 0,
            required: vec![0; item_span],
            available: vec![0; item_span],
            committed: vec![false; aisle_count],
            committed_count: 0,
        }
    }

    /// Units accepted so far.
    pub fn total_units(&self) -> u64 {
        self.total_units
    }

    /// Quantity of `item` required by accepted orders.
    pub fn required(&self, item: usize) -> u64 {
        self.required.get(item).copied().unwrap_or(0)
    }

    /// Stock of `item` unlocked by committed aisles.
    pub fn available(&self, item: usize) -> u64 {
        self.available.get(item).copied().unwrap_or(0)
    }

    /// Whether `aisle` is committed.
    pub fn is_committed(&self, aisle: usize) -> bool {
        self.committed.get(aisle).copied().unwrap_or(false)
    }

    /// Number of committed aisles.
    pub fn committed_count(&self) -> usize {
        self.committed_count
    }

    /// Committed aisles, ascending.
    pub fn committed_aisles(&self) -> BTreeSet<usize> {
        self.committed
            .iter()
            .enumerate()
            .filter_map(|(aisle, &c)| c.then_some(aisle))
            .collect()
    }

    /// Whether adding `units` keeps the total within `upper`.
    #[inline]
    pub fn fits_upper(&self, units: u64, upper: u64) -> bool {
        self.total_units.saturating_add(units) <= upper
    }

    /// Whether every item of `order` can be covered by committed aisles
    /// plus, where needed, the aisles stocking that item.
    ///
    /// Items already covered are accepted without recomputation. Otherwise
    /// the stock of that single item is recomputed over the prospective
    /// set (committed ∪ aisles stocking the item), touching only the
    /// item's aisles.
    pub fn can_cover(&self, order: &Order, aisles: &[Aisle], index: &ItemAisleIndex) -> bool {
        order.iter().all(|(item, needed)| {
            let projected = self.required(item) + u64::from(needed);
            if projected <= self.available(item) {
                return true;
            }

            let mut prospective = self.available(item);
            let mut grew = false;
            for &aisle in index.aisles_for(item) {
                if !self.is_committed(aisle) {
                    prospective += u64::from(aisles[aisle].quantity(item));
                    grew = true;
                }
            }
            grew && projected <= prospective
        })
    }

    /// Accepts `order`: adds its units and requirements, commits every aisle
    /// stocking one of its items, and unlocks each newly committed aisle's
    /// full stock once.
    pub fn accept(&mut self, order: &Order, aisles: &[Aisle], index: &ItemAisleIndex) {
        for (item, qty) in order.iter() {
            self.total_units += u64::from(qty);
            self.required[item] += u64::from(qty);
        }
        for (item, _) in order.iter() {
            for &aisle in index.aisles_for(item) {
                if self.committed[aisle] {
                    continue;
                }
                self.committed[aisle] = true;
                self.committed_count += 1;
                for (stocked, qty) in aisles[aisle].iter() {
                    self.available[stocked] += u64::from(qty);
                }
            }
        }
    }
}
