//! Session-stored models for storefront.

pub mod session;

pub use session::{ProfileDetails, SellerAccount, keys as session_keys};
