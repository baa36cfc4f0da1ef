//! Cart state transitions.
//!
//! [`Cart`] holds the ordered line items of a shopper's cart and applies
//! mutations to them. It never persists or notifies anything itself: each
//! mutation returns the [`CartEvent`] it produced, and the caller decides how
//! to store the new state and surface the event.
//!
//! # Invariants
//!
//! - At most one line item per product ID.
//! - Every line item has a quantity of at least 1.
//! - Subtotal and item count are always computed from the items, never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notification::Notification;
use crate::types::{Price, ProductId};

/// A product reference plus quantity held in the cart.
///
/// The serialized form is the persisted cart layout:
/// `{"id": "1", "name": "...", "price": 129.99, "image": "...", "quantity": 2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price. Stored as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
}

impl LineItem {
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
            quantity,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Unit price as a displayable [`Price`].
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }
}

/// Persisted cart data that cannot be restored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The data is not a list of line items.
    #[error("malformed cart data: {0}")]
    Malformed(String),
    /// Two line items share a product ID.
    #[error("duplicate line item for product {0}")]
    DuplicateItem(ProductId),
    /// A line item has quantity zero.
    #[error("line item for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
    /// A line item has a negative unit price.
    #[error("line item for product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// What a cart mutation did, from the shopper's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line item was appended.
    ItemAdded { name: String },
    /// An existing line item absorbed the added quantity.
    QuantityIncreased { name: String },
    /// A line item was removed.
    ItemRemoved { name: String },
    /// Every line item was removed.
    Cleared,
}

impl CartEvent {
    /// The toast shown for this event.
    #[must_use]
    pub fn notification(&self) -> Notification {
        match self {
            Self::ItemAdded { name } => Notification::success(format!("Added {name} to cart")),
            Self::QuantityIncreased { name } => {
                Notification::success(format!("Updated quantity for {name}"))
            }
            Self::ItemRemoved { name } => Notification::info(format!("Removed {name} from cart")),
            Self::Cleared => Notification::info("Cart cleared"),
        }
    }
}

/// The ordered collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from previously persisted items, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns an error if two items share an ID, an item has quantity zero,
    /// or an item has a negative price.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        for (index, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(CartError::ZeroQuantity(item.id.clone()));
            }
            if item.price.is_sign_negative() && !item.price.is_zero() {
                return Err(CartError::NegativePrice(item.id.clone()));
            }
            if items.iter().take(index).any(|earlier| earlier.id == item.id) {
                return Err(CartError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Restore a cart from its serialized form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a JSON list of line items or if
    /// the items break a cart invariant.
    pub fn from_json(json: &str) -> Result<Self, CartError> {
        let items: Vec<LineItem> =
            serde_json::from_str(json).map_err(|e| CartError::Malformed(e.to_string()))?;
        Self::from_items(items)
    }

    /// Serialize the full item collection.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line item for a product.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Add an item, merging with an existing line for the same product.
    ///
    /// When the product is already in the cart only the quantity changes; the
    /// stored name, price and image are kept. An incoming quantity of zero is
    /// treated as one.
    pub fn add(&mut self, item: LineItem) -> CartEvent {
        let quantity = item.quantity.max(1);

        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return CartEvent::QuantityIncreased { name: item.name };
        }

        let name = item.name.clone();
        self.items.push(LineItem { quantity, ..item });
        CartEvent::ItemAdded { name }
    }

    /// Remove the line item for a product. Absent products are a no-op.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartEvent> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        let removed = self.items.remove(index);
        Some(CartEvent::ItemRemoved { name: removed.name })
    }

    /// Set the quantity for a product.
    ///
    /// A quantity of zero removes the item. Absent products are a no-op.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> Option<CartEvent> {
        if quantity < 1 {
            return self.remove(id);
        }

        if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            item.quantity = quantity;
        }
        None
    }

    /// Remove every line item.
    pub fn clear(&mut self) -> CartEvent {
        self.items.clear();
        CartEvent::Cleared
    }

    /// Sum of unit price times quantity over all items.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities over all items.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |total, item| total.saturating_add(item.quantity))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn lamp(quantity: u32) -> LineItem {
        LineItem::new(
            "1",
            "Minimalist Desk Lamp",
            Decimal::new(12999, 2),
            "lamp.jpg",
            quantity,
        )
    }

    fn bottle(quantity: u32) -> LineItem {
        LineItem::new(
            "6",
            "Matte Black Water Bottle",
            Decimal::new(3999, 2),
            "bottle.jpg",
            quantity,
        )
    }

    fn assert_unique_ids(cart: &Cart) {
        for (index, item) in cart.items().iter().enumerate() {
            assert!(
                !cart.items()[..index].iter().any(|other| other.id == item.id),
                "duplicate line item for {}",
                item.id
            );
            assert!(item.quantity >= 1);
        }
    }

    #[test]
    fn test_add_new_item_appends() {
        let mut cart = Cart::new();
        let event = cart.add(lamp(1));
        cart.add(bottle(2));

        assert_eq!(
            event,
            CartEvent::ItemAdded {
                name: "Minimalist Desk Lamp".to_string()
            }
        );
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id, ProductId::new("1"));
        assert_eq!(cart.items()[1].id, ProductId::new("6"));
    }

    #[test]
    fn test_add_same_item_twice_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(lamp(2));
        let event = cart.add(lamp(3));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert!(matches!(event, CartEvent::QuantityIncreased { .. }));
    }

    #[test]
    fn test_duplicate_add_keeps_stored_metadata() {
        let mut cart = Cart::new();
        cart.add(lamp(1));

        let mut renamed = lamp(1);
        renamed.name = "Renamed Lamp".to_string();
        renamed.price = Decimal::new(1, 0);
        cart.add(renamed);

        let item = cart.get(&ProductId::new("1")).unwrap();
        assert_eq!(item.name, "Minimalist Desk Lamp");
        assert_eq!(item.price, Decimal::new(12999, 2));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_add_zero_quantity_counts_as_one() {
        let mut cart = Cart::new();
        cart.add(lamp(0));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_remove_present_and_absent() {
        let mut cart = Cart::new();
        cart.add(lamp(1));

        assert_eq!(cart.remove(&ProductId::new("missing")), None);
        assert_eq!(cart.len(), 1);

        let event = cart.remove(&ProductId::new("1"));
        assert_eq!(
            event,
            Some(CartEvent::ItemRemoved {
                name: "Minimalist Desk Lamp".to_string()
            })
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add(lamp(1));

        assert_eq!(cart.update_quantity(&ProductId::new("1"), 4), None);
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(lamp(1));
        let before = cart.clone();

        cart.update_quantity(&ProductId::new("9"), 3);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity_zero_matches_remove() {
        let mut updated = Cart::new();
        updated.add(lamp(2));
        updated.add(bottle(1));
        let mut removed = updated.clone();

        let update_event = updated.update_quantity(&ProductId::new("1"), 0);
        let remove_event = removed.remove(&ProductId::new("1"));

        assert_eq!(updated, removed);
        assert_eq!(update_event, remove_event);
    }

    #[test]
    fn test_clear_resets_totals() {
        let mut cart = Cart::new();
        cart.add(lamp(2));
        cart.add(bottle(3));

        assert_eq!(cart.clear(), CartEvent::Cleared);
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_derived_totals() {
        let mut cart = Cart::new();
        cart.add(lamp(2));
        cart.add(bottle(3));

        // 2 * 129.99 + 3 * 39.99
        assert_eq!(cart.subtotal(), Decimal::new(37995, 2));
        assert_eq!(cart.total_items(), 5);

        // Reads are idempotent
        assert_eq!(cart.subtotal(), cart.subtotal());
        assert_eq!(cart.total_items(), cart.total_items());
    }

    #[test]
    fn test_operation_sequences_keep_invariants() {
        let ids = ["1", "2", "3", "4"];
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut cart = Cart::new();

        for _ in 0..2_000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;

            let id = ids[usize::try_from(seed % 4).unwrap()];
            let quantity = u32::try_from((seed >> 8) % 5).unwrap();
            match (seed >> 16) % 3 {
                0 => {
                    cart.add(LineItem::new(id, id, Decimal::new(250, 2), "", quantity));
                }
                1 => {
                    cart.remove(&ProductId::new(id));
                }
                _ => {
                    cart.update_quantity(&ProductId::new(id), quantity);
                }
            }

            assert_unique_ids(&cart);
            let expected_subtotal: Decimal = cart
                .items()
                .iter()
                .map(|item| item.price * Decimal::from(item.quantity))
                .sum();
            let expected_count: u32 = cart.items().iter().map(|item| item.quantity).sum();
            assert_eq!(cart.subtotal(), expected_subtotal);
            assert_eq!(cart.total_items(), expected_count);
        }
    }

    #[test]
    fn test_json_round_trip() {
        let mut cart = Cart::new();
        cart.add(lamp(2));
        cart.add(bottle(1));

        let json = cart.to_json().unwrap();
        let restored = Cart::from_json(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_persisted_layout_uses_numeric_price() {
        let mut cart = Cart::new();
        cart.add(bottle(1));

        let value: serde_json::Value = serde_json::from_str(&cart.to_json().unwrap()).unwrap();
        let item = &value[0];
        assert_eq!(item["id"], "6");
        assert_eq!(item["quantity"], 1);
        assert!(item["price"].is_number());
    }

    #[test]
    fn test_from_json_accepts_browser_layout() {
        let json = r#"[{"id":"3","name":"Ceramic Pour-Over Coffee Set","price":84.99,"image":"a.jpg","quantity":2}]"#;
        let cart = Cart::from_json(json).unwrap();
        assert_eq!(cart.subtotal(), Decimal::new(16998, 2));
    }

    #[test]
    fn test_from_json_rejects_corrupt_data() {
        assert!(matches!(
            Cart::from_json("not json"),
            Err(CartError::Malformed(_))
        ));
        assert!(matches!(
            Cart::from_json(r#"{"id":"1"}"#),
            Err(CartError::Malformed(_))
        ));
        assert!(matches!(
            Cart::from_json(r#"[{"id":"1","name":"x","price":1,"image":"","quantity":-1}]"#),
            Err(CartError::Malformed(_))
        ));
    }

    #[test]
    fn test_from_items_rejects_broken_invariants() {
        assert!(matches!(
            Cart::from_items(vec![lamp(1), lamp(2)]),
            Err(CartError::DuplicateItem(_))
        ));
        assert!(matches!(
            Cart::from_items(vec![lamp(0)]),
            Err(CartError::ZeroQuantity(_))
        ));

        let mut negative = lamp(1);
        negative.price = Decimal::new(-1, 0);
        assert!(matches!(
            Cart::from_items(vec![negative]),
            Err(CartError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_event_notifications() {
        let added = CartEvent::ItemAdded {
            name: "Lamp".to_string(),
        };
        assert_eq!(added.notification().message, "Added Lamp to cart");

        let updated = CartEvent::QuantityIncreased {
            name: "Lamp".to_string(),
        };
        assert_eq!(updated.notification().message, "Updated quantity for Lamp");

        let removed = CartEvent::ItemRemoved {
            name: "Lamp".to_string(),
        };
        assert_eq!(removed.notification().message, "Removed Lamp from cart");
        assert_eq!(CartEvent::Cleared.notification().message, "Cart cleared");
    }
}
