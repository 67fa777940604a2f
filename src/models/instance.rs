//! Problem instance model.
//!
//! Bundles the order list, the aisle list, the item count, and the
//! wave-size window. Instances are immutable for the duration of a solve.

use serde::{Deserialize, Serialize};

use super::{Aisle, Order};

/// Inclusive window `[lower, upper]` on total picked units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveBounds {
    /// Minimum wave size (LB).
    pub lower: u64,
    /// Maximum wave size (UB).
    pub upper: u64,
}

impl WaveBounds {
    /// Creates a window.
    pub fn new(lower: u64, upper: u64) -> Self {
        Self { lower, upper }
    }

    /// Whether `units` lies within `[lower, upper]`.
    #[inline]
    pub fn contains(&self, units: u64) -> bool {
        units >= self.lower && units <= self.upper
    }

    /// Midpoint of the window.
    pub fn midpoint(&self) -> f64 {
        (self.lower as f64 + self.upper as f64) / 2.0
    }

    /// Whether `lower <= upper`.
    pub fn is_ordered(&self) -> bool {
        self.lower <= self.upper
    }
}

/// A wave-selection problem instance.
///
/// # Example
/// ```
/// use u_wave::models::{Aisle, Instance, Order};
///
/// let instance = Instance::new(2, 5, 10)
///     .with_order(Order::new().with_item(0, 3))
///     .with_order(Order::new().with_item(1, 4))
///     .with_aisle(Aisle::new().with_stock(0, 5).with_stock(1, 5));
/// assert_eq!(instance.order_count(), 2);
/// assert_eq!(instance.total_demand(), 7);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Instance {
    /// Orders, addressed by position.
    pub orders: Vec<Order>,
    /// Aisles, addressed by position.
    pub aisles: Vec<Aisle>,
    /// Declared number of distinct items.
    pub n_items: usize,
    /// Wave-size window.
    pub bounds: WaveBounds,
}

impl Instance {
    /// Creates an instance with no orders or aisles.
    pub fn new(n_items: usize, wave_size_lb: u64, wave_size_ub: u64) -> Self {
        Self {
            orders: Vec::new(),
            aisles: Vec::new(),
            n_items,
            bounds: WaveBounds::new(wave_size_lb, wave_size_ub),
        }
    }

    /// Appends an order.
    pub fn with_order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    /// Appends an aisle.
    pub fn with_aisle(mut self, aisle: Aisle) -> Self {
        self.aisles.push(aisle);
        self
    }

    /// Replaces the order list.
    pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
        self.orders = orders;
        self
    }

    /// Replaces the aisle list.
    pub fn with_aisles(mut self, aisles: Vec<Aisle>) -> Self {
        self.aisles = aisles;
        self
    }

    /// Number of orders.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of aisles.
    pub fn aisle_count(&self) -> usize {
        self.aisles.len()
    }

    /// Sum of requested units over all orders.
    pub fn total_demand(&self) -> u64 {
        self.orders.iter().map(Order::units).sum()
    }

    /// Units requested by each order, by position.
    pub fn order_units(&self) -> Vec<u64> {
        self.orders.iter().map(Order::units).collect()
    }

    /// Length for dense per-item arrays.
    ///
    /// At least `n_items`, extended to cover any larger item id that appears
    /// in an order or aisle.
    pub fn item_span(&self) -> usize {
        let max_order_item = self
            .orders
            .iter()
            .filter_map(|o| o.items.keys().next_back())
            .max();
        let max_aisle_item = self
            .aisles
            .iter()
            .filter_map(|a| a.stock.keys().next_back())
            .max();
        let referenced = max_order_item
            .into_iter()
            .chain(max_aisle_item)
            .max()
            .map_or(0, |&item| item + 1);
        self.n_items.max(referenced)
    }
}
