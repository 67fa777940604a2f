//! Input validation for wave-picking instances.
//!
//! Checks structural integrity of an instance before it is handed to a
//! solver. The solver itself never calls this: instances reach it already
//! validated by the loader. Detects:
//! - Inverted wave bounds
//! - Item ids outside `0..n_items`
//! - Explicit zero quantities
//! - Ordered items that no aisle stocks

use thiserror::Error;

use crate::evaluation::ItemAisleIndex;
use crate::models::Instance;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Lower wave bound exceeds the upper bound.
    InvertedBounds,
    /// An order or aisle references an item id ≥ `n_items`.
    ItemOutOfRange,
    /// An order or aisle lists an item with quantity 0.
    ZeroQuantity,
    /// An order requests an item that no aisle stocks.
    UnstockedItem,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates an instance.
///
/// Checks:
/// 1. `lower ≤ upper`
/// 2. Every item id in orders and aisles is below `n_items`
/// 3. No order or aisle stores a zero quantity
/// 4. Every ordered item is stocked by at least one aisle
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();

    if !instance.bounds.is_ordered() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvertedBounds,
            format!(
                "Wave lower bound {} exceeds upper bound {}",
                instance.bounds.lower, instance.bounds.upper
            ),
        ));
    }

    for (a, aisle) in instance.aisles.iter().enumerate() {
        for (&item, &qty) in &aisle.stock {
            check_entry(instance, "Aisle", a, item, qty, &mut errors);
        }
    }

    let index = ItemAisleIndex::build(&instance.aisles);
    for (o, order) in instance.orders.iter().enumerate() {
        for (&item, &qty) in &order.items {
            check_entry(instance, "Order", o, item, qty, &mut errors);
            if qty > 0 && !index.is_stocked(item) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnstockedItem,
                    format!("Order {o} requests item {item}, which no aisle stocks"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_entry(
    instance: &Instance,
    owner: &str,
    position: usize,
    item: usize,
    qty: u32,
    errors: &mut Vec<ValidationError>,
) {
    if item >= instance.n_items {
        errors.push(ValidationError::new(
            ValidationErrorKind::ItemOutOfRange,
            format!(
                "{owner} {position} references item {item} (n_items = {})",
                instance.n_items
            ),
        ));
    }
    if qty == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroQuantity,
            format!("{owner} {position} lists item {item} with quantity 0"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Aisle, Order};

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_instance() {
        let instance = Instance::new(2, 1, 10)
            .with_order(Order::new().with_item(0, 2).with_item(1, 1))
            .with_aisle(Aisle::new().with_stock(0, 5).with_stock(1, 5));
        assert!(validate_instance(&instance).is_ok());
    }

    #[test]
    fn test_inverted_bounds() {
        let instance = Instance::new(1, 10, 5);
        assert_eq!(
            kinds(validate_instance(&instance)),
            vec![ValidationErrorKind::InvertedBounds]
        );
    }

    #[test]
    fn test_item_out_of_range() {
        let instance = Instance::new(1, 0, 10).with_aisle(Aisle::new().with_stock(3, 1));
        let errors = validate_instance(&instance).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::ItemOutOfRange);
        assert!(errors[0].to_string().contains("item 3"));
    }

    #[test]
    fn test_zero_quantity() {
        let mut order = Order::new().with_item(0, 1);
        order.items.insert(0, 0);
        let instance = Instance::new(1, 0, 10)
            .with_order(order)
            .with_aisle(Aisle::new().with_stock(0, 1));
        assert_eq!(
            kinds(validate_instance(&instance)),
            vec![ValidationErrorKind::ZeroQuantity]
        );
    }

    #[test]
    fn test_unstocked_item() {
        let instance = Instance::new(2, 0, 10)
            .with_order(Order::new().with_item(1, 2))
            .with_aisle(Aisle::new().with_stock(0, 5));
        assert_eq!(
            kinds(validate_instance(&instance)),
            vec![ValidationErrorKind::UnstockedItem]
        );
    }

    #[test]
    fn test_multiple_errors() {
        let instance = Instance::new(1, 9, 2)
            .with_order(Order::new().with_item(4, 1))
            .with_aisle(Aisle::new().with_stock(0, 1));
        let errors = validate_instance(&instance).unwrap_err();
        // inverted bounds, out-of-range item, unstocked item
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_error_is_std_error() {
        let errors = validate_instance(&Instance::new(1, 3, 1)).unwrap_err();
        let err: &dyn std::error::Error = &errors[0];
        assert_eq!(err.to_string(), "Wave lower bound 3 exceeds upper bound 1");
    }
}
