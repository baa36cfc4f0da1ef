//! Session-related types.
//!
//! Everything a shopper accumulates lives in their session: the cart, queued
//! flash messages, their profile edits and their seller registration.

use serde::{Deserialize, Serialize};

/// Profile details shown on the account page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
}

impl Default for ProfileDetails {
    /// The demo shopper every new session starts as.
    fn default() -> Self {
        Self {
            full_name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: Some("555-123-4567".to_string()),
            address: "123 Main St, City, State, 12345".to_string(),
        }
    }
}

/// A seller registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerAccount {
    pub business_name: String,
    pub business_description: String,
    /// One of [`crate::forms::SELLER_CATEGORIES`].
    pub category: String,
    pub tax_id: String,
}

/// Session keys.
pub mod keys {
    /// Key for the serialized cart line items.
    pub const CART: &str = "cart";

    /// Key for notifications waiting to be shown on the next page.
    pub const FLASH: &str = "flash";

    /// Key for the shopper's edited profile.
    pub const PROFILE: &str = "profile";

    /// Key for the shopper's seller registration.
    pub const SELLER: &str = "seller_account";
}
