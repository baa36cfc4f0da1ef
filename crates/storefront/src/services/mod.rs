//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Cart container: restore, mutate, persist, notify
//! - `notifications` - Toast queue, flash messages and `HX-Trigger` payloads
//! - `simulation` - Fixed-delay stand-in for backend calls

pub mod cart;
pub mod notifications;
pub mod simulation;

pub use cart::{CartContainer, CartStore, CartStoreError, MemoryCartStore, SessionCartStore};
pub use notifications::ToastQueue;
pub use simulation::simulate_round_trip;
