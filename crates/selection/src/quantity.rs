//! Stock sufficiency and decimal policy checks for quantity edits.

use serde::{Deserialize, Serialize};

use stockpick_catalog::{Lot, Product};
use stockpick_core::{SelectionError, SelectionResult};

/// Smallest accepted fractional step for decimal-quantity products.
pub const MIN_FRACTIONAL_STEP: f64 = 0.01;

/// Outcome of a quantity edit check.
///
/// `excess_stock` is a warning, not a rejection: the store records the
/// quantity regardless, and the authoritative stock check happens server-side
/// when the parent form commits.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityCheck {
    /// The quantity after decimal-policy normalization; this is what the
    /// store should record.
    pub quantity: f64,
    /// True iff the normalized quantity exceeds the lot's current stock.
    pub excess_stock: bool,
}

/// Whether `quantity` exceeds the lot's on-hand stock.
///
/// Independent of the decimal policy by definition.
pub fn excess_stock(quantity: f64, lot: &Lot) -> bool {
    quantity > lot.current_quantity
}

/// Apply the product's decimal policy to a requested quantity.
///
/// Non-decimal products floor typed values to whole units. Non-finite or
/// non-positive requests (including fractions that floor to zero) are input
/// corruption, not stock questions, and fail hard.
pub fn normalize_quantity(product: &Product, requested: f64) -> SelectionResult<f64> {
    if !requested.is_finite() {
        return Err(SelectionError::validation("quantity must be a finite number"));
    }
    let normalized = if product.allows_decimals() {
        requested
    } else {
        requested.floor()
    };
    let min = if product.allows_decimals() {
        MIN_FRACTIONAL_STEP
    } else {
        1.0
    };
    if normalized < min {
        return Err(SelectionError::validation(format!(
            "quantity must be at least {min}"
        )));
    }
    Ok(normalized)
}

/// Full check for a quantity edit: normalize, then flag stock excess.
pub fn check_quantity(product: &Product, lot: &Lot, requested: f64) -> SelectionResult<QuantityCheck> {
    let quantity = normalize_quantity(product, requested)?;
    let excess = excess_stock(quantity, lot);
    if excess {
        tracing::debug!(
            product = product.name(),
            lot = lot.lot_number.as_str(),
            quantity,
            on_hand = lot.current_quantity,
            "quantity exceeds lot stock"
        );
    }
    Ok(QuantityCheck {
        quantity,
        excess_stock: excess,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockpick_core::{LotId, ProductId};

    fn lot(current: f64) -> Lot {
        Lot {
            id: LotId::new(),
            lot_number: "L-100".to_string(),
            current_quantity: current,
            reserved_quantity: 0.0,
            unit: "pcs".to_string(),
            expiration_date: None,
        }
    }

    fn product(allows_decimals: bool) -> Product {
        Product::consumable(ProductId::new(), "Saline 0.9%", allows_decimals, Vec::new())
    }

    #[test]
    fn excess_iff_quantity_exceeds_current() {
        let lot = lot(5.0);
        assert!(!excess_stock(5.0, &lot));
        assert!(excess_stock(5.01, &lot));
        assert!(!excess_stock(0.5, &lot));
    }

    #[test]
    fn integer_products_floor_typed_quantities() {
        let check = check_quantity(&product(false), &lot(5.0), 2.9).unwrap();
        assert_eq!(check.quantity, 2.0);
        assert!(!check.excess_stock);
    }

    #[test]
    fn decimal_products_accept_fractions() {
        let check = check_quantity(&product(true), &lot(5.0), 2.75).unwrap();
        assert_eq!(check.quantity, 2.75);
        assert!(!check.excess_stock);
    }

    #[test]
    fn excess_is_a_warning_not_an_error() {
        let check = check_quantity(&product(true), &lot(5.0), 7.0).unwrap();
        assert_eq!(check.quantity, 7.0);
        assert!(check.excess_stock);
    }

    #[test]
    fn flooring_applies_before_the_stock_check() {
        // 5.9 floors to 5.0, which fits exactly.
        let check = check_quantity(&product(false), &lot(5.0), 5.9).unwrap();
        assert_eq!(check.quantity, 5.0);
        assert!(!check.excess_stock);
    }

    #[test]
    fn sub_unit_quantities_are_rejected() {
        assert!(matches!(
            normalize_quantity(&product(false), 0.4),
            Err(SelectionError::Validation(_))
        ));
        assert!(matches!(
            normalize_quantity(&product(true), 0.001),
            Err(SelectionError::Validation(_))
        ));
    }

    #[test]
    fn non_finite_quantities_are_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                normalize_quantity(&product(true), bad),
                Err(SelectionError::Validation(_))
            ));
        }
    }
}
