//! Essence Core - Domain types and pure storefront logic.
//!
//! This crate provides the pieces of the storefront that do not touch the
//! outside world:
//! - `types` - Newtype IDs and prices
//! - `cart` - Line items and cart state transitions
//! - `catalog` - The product catalog and its query helpers
//! - `notification` - User-facing notifications produced by state changes
//! - `summary` - Shipping, tax and totals derived from a subtotal
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! sessions, no HTTP. Persistence and notification delivery live in the
//! storefront crate, which drives these types.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod notification;
pub mod summary;
pub mod types;

pub use cart::{Cart, CartError, CartEvent, LineItem};
pub use catalog::{Catalog, CatalogError, Product, ProductFilter};
pub use notification::{Notification, NotificationLevel};
pub use summary::OrderSummary;
pub use types::*;
