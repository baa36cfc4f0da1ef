//! Order summary: shipping, tax and total derived from a cart subtotal.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::cart::Cart;

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Flat shipping charge below the free-shipping threshold ($5.99).
pub const FLAT_SHIPPING: Decimal = Decimal::from_parts(599, 0, 0, false, 2);

/// Sales tax rate applied to the subtotal (7%).
pub const TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

/// Totals shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Compute the summary for a subtotal.
    ///
    /// An empty cart (zero subtotal) has no shipping charge.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let shipping = if subtotal.is_zero() || subtotal >= FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING
        };
        let tax = (subtotal * TAX_RATE)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        Self::from_subtotal(cart.subtotal())
    }

    /// Returns `true` when shipping is free.
    #[must_use]
    pub const fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;

    #[test]
    fn test_empty_cart_has_no_charges() {
        let summary = OrderSummary::for_cart(&Cart::new());
        assert_eq!(summary.shipping, Decimal::ZERO);
        assert_eq!(summary.tax, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::ZERO);
        assert!(summary.free_shipping());
    }

    #[test]
    fn test_small_order_pays_flat_shipping() {
        let summary = OrderSummary::from_subtotal(Decimal::new(3999, 2));
        assert_eq!(summary.shipping, Decimal::new(599, 2));
        // 39.99 * 0.07 = 2.7993
        assert_eq!(summary.tax, Decimal::new(280, 2));
        assert_eq!(summary.total, Decimal::new(4878, 2));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let summary = OrderSummary::from_subtotal(Decimal::new(50, 0));
        assert!(summary.free_shipping());
        assert_eq!(summary.tax, Decimal::new(350, 2));
        assert_eq!(summary.total, Decimal::new(5350, 2));
    }

    #[test]
    fn test_for_cart_uses_cart_subtotal() {
        let mut cart = Cart::new();
        cart.add(LineItem::new("1", "Lamp", Decimal::new(12999, 2), "", 1));

        let summary = OrderSummary::for_cart(&cart);
        assert_eq!(summary.subtotal, Decimal::new(12999, 2));
        // 129.99 * 0.07 = 9.0993
        assert_eq!(summary.tax, Decimal::new(910, 2));
        assert_eq!(summary.total, Decimal::new(13909, 2));
    }
}
