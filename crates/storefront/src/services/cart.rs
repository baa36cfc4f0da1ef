//! Cart state container.
//!
//! [`CartContainer`] is the single owner of a shopper's cart for the
//! duration of one request. It restores the cart from a [`CartStore`],
//! applies mutations through the pure [`Cart`] type, writes the full item
//! list back after every mutation and hands each resulting notification to
//! its subscribers.
//!
//! Persistence is best-effort in both directions: unreadable data restores
//! as an empty cart and a failed write is logged, never surfaced.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use rust_decimal::Decimal;
use thiserror::Error;
use tower_sessions::Session;
use tracing::instrument;

use essence_core::{Cart, LineItem, Notification, OrderSummary, ProductId};

use crate::models::session_keys;

/// Errors from reading or writing the persisted cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The session store failed.
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// A durable slot holding the serialized cart.
pub trait CartStore: Send + Sync {
    /// Read the slot. `None` when nothing was ever saved.
    fn load(&self) -> impl Future<Output = Result<Option<String>, CartStoreError>> + Send;

    /// Replace the slot's contents.
    fn save(&self, data: String) -> impl Future<Output = Result<(), CartStoreError>> + Send;
}

/// Cart slot in the shopper's session.
#[derive(Debug, Clone)]
pub struct SessionCartStore {
    session: Session,
}

impl SessionCartStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStore for SessionCartStore {
    async fn load(&self) -> Result<Option<String>, CartStoreError> {
        Ok(self.session.get::<String>(session_keys::CART).await?)
    }

    async fn save(&self, data: String) -> Result<(), CartStoreError> {
        self.session.insert(session_keys::CART, data).await?;
        Ok(())
    }
}

/// Process-local cart slot, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with raw data.
    #[must_use]
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(data.into()))),
        }
    }

    /// Current raw contents.
    #[must_use]
    pub fn data(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartStore for MemoryCartStore {
    async fn load(&self) -> Result<Option<String>, CartStoreError> {
        Ok(self.data())
    }

    async fn save(&self, data: String) -> Result<(), CartStoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(data);
        Ok(())
    }
}

/// Callback invoked with every notification the container emits.
pub type Subscriber = Box<dyn FnMut(&Notification) + Send + Sync>;

/// The cart for one interaction, bound to where it is persisted.
pub struct CartContainer<S: CartStore> {
    cart: Cart,
    store: S,
    subscribers: Vec<Subscriber>,
}

impl<S: CartStore> std::fmt::Debug for CartContainer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartContainer")
            .field("cart", &self.cart)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl CartContainer<SessionCartStore> {
    /// Restore the cart held in a shopper's session.
    pub async fn from_session(session: &Session) -> Self {
        Self::restore(SessionCartStore::new(session.clone())).await
    }
}

impl<S: CartStore> CartContainer<S> {
    /// Restore the cart from `store`.
    ///
    /// Missing, unreadable or invalid data yields an empty cart.
    #[instrument(skip_all)]
    pub async fn restore(store: S) -> Self {
        let cart = match store.load().await {
            Ok(Some(data)) => Cart::from_json(&data).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable cart");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load cart, starting empty");
                Cart::new()
            }
        };

        Self {
            cart,
            store,
            subscribers: Vec::new(),
        }
    }

    /// Register a callback for every notification emitted from now on.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Notification) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.cart.total_items()
    }

    /// Shipping, tax and total for the current items.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::for_cart(&self.cart)
    }

    /// Add an item, merging quantities with an existing line.
    #[instrument(skip(self, item), fields(product_id = %item.id, quantity = item.quantity))]
    pub async fn add(&mut self, item: LineItem) {
        let event = self.cart.add(item);
        self.commit(Some(event.notification())).await;
    }

    /// Remove a product's line. No-op when absent.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove(&mut self, id: &ProductId) {
        let event = self.cart.remove(id);
        self.commit(event.map(|event| event.notification())).await;
    }

    /// Set a product's quantity; zero removes the line.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        let event = self.cart.update_quantity(id, quantity);
        self.commit(event.map(|event| event.notification())).await;
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) {
        let event = self.cart.clear();
        self.commit(Some(event.notification())).await;
    }

    async fn commit(&mut self, notification: Option<Notification>) {
        self.persist().await;

        if let Some(notification) = notification {
            for subscriber in &mut self.subscribers {
                subscriber(&notification);
            }
        }
    }

    async fn persist(&self) {
        let data = match self.cart.to_json() {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.store.save(data).await {
            tracing::error!(error = %e, "Failed to persist cart");
        }
    }
}
