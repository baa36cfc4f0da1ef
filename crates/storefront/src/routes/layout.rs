//! Data every full page renders around its content.

use tower_sessions::Session;

use essence_core::Notification;

use crate::services::CartContainer;
use crate::services::notifications::take_flash;

/// Navbar badge and pending toasts for `base.html`.
#[derive(Debug, Clone, Default)]
pub struct LayoutView {
    pub cart_count: u32,
    pub toasts: Vec<Notification>,
}

impl LayoutView {
    /// Layout for a page that already restored the cart.
    ///
    /// Consumes any flash messages queued in the session.
    pub async fn new(session: &Session, cart_count: u32) -> Self {
        Self {
            cart_count,
            toasts: take_flash(session).await,
        }
    }

    /// Layout for a page that does not otherwise touch the cart.
    pub async fn for_session(session: &Session) -> Self {
        let cart = CartContainer::from_session(session).await;
        Self::new(session, cart.total_items()).await
    }
}
