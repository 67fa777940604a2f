//! Item → aisle lookup.
//!
//! Built once per solve in a single pass over every `(aisle, item, quantity)`
//! triple and shared read-only by ranking, construction, and decoding.

use crate::models::Aisle;

/// For each item, the ascending list of aisles that stock it.
///
/// An aisle appears under item `i` iff its stock map holds `i` with a
/// positive quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemAisleIndex {
    aisles_by_item: Vec<Vec<usize>>,
}

impl ItemAisleIndex {
    /// Builds the index from the aisle list.
    pub fn build(aisles: &[Aisle]) -> Self {
        let mut aisles_by_item: Vec<Vec<usize>> = Vec::new();
        for (aisle_idx, aisle) in aisles.iter().enumerate() {
            for (item, qty) in aisle.iter() {
                if qty == 0 {
                    continue;
                }
                if item >= aisles_by_item.len() {
                    aisles_by_item.resize_with(item + 1, Vec::new);
                }
                aisles_by_item[item].push(aisle_idx);
            }
        }
        Self { aisles_by_item }
    }

    /// Aisles stocking `item`, ascending. Empty for unknown items.
    pub fn aisles_for(&self, item: usize) -> &[usize] {
        self.aisles_by_item
            .get(item)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether at least one aisle stocks `item`.
    pub fn is_stocked(&self, item: usize) -> bool {
        !self.aisles_for(item).is_empty()
    }

    /// Number of items with at least one stocking aisle.
    pub fn stocked_item_count(&self) -> usize {
        self.aisles_by_item.iter().filter(|a| !a.is_empty()).count()
    }

    /// Number of (item, aisle) entries.
    pub fn entry_count(&self) -> usize {
        self.aisles_by_item.iter().map(Vec::len).sum()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}
