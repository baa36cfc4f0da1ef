//! Getting notifications in front of the shopper.
//!
//! Handlers subscribe a [`ToastQueue`] to the cart container and push their
//! own messages onto it. When the response is built the queue is drained
//! either into an `HX-Trigger` header (HTMX requests) or into the session
//! as flash messages shown on the next full page.

use std::sync::{Arc, Mutex, PoisonError};

use axum::http::{HeaderName, HeaderValue};
use serde_json::json;
use tower_sessions::Session;

use essence_core::Notification;

use crate::models::session_keys;

/// Response header HTMX reads client-side events from.
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Notifications collected while handling one request.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, notification: Notification) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }

    /// A cart subscriber that appends to this queue.
    #[must_use]
    pub fn subscriber(&self) -> impl FnMut(&Notification) + Send + Sync + 'static {
        let queue = self.clone();
        move |notification| queue.push(notification.clone())
    }

    /// Drain everything queued so far, oldest first.
    #[must_use]
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Queue notifications for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn push_flash(
    session: &Session,
    notifications: Vec<Notification>,
) -> Result<(), tower_sessions::session::Error> {
    if notifications.is_empty() {
        return Ok(());
    }

    let mut pending = session
        .get::<Vec<Notification>>(session_keys::FLASH)
        .await?
        .unwrap_or_default();
    pending.extend(notifications);
    session.insert(session_keys::FLASH, pending).await
}

/// Remove and return queued flash messages.
///
/// Store failures are logged and treated as an empty queue.
pub async fn take_flash(session: &Session) -> Vec<Notification> {
    match session.remove::<Vec<Notification>>(session_keys::FLASH).await {
        Ok(pending) => pending.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash messages");
            Vec::new()
        }
    }
}

/// `HX-Trigger` value announcing the new cart count and any toasts.
///
/// ```text
/// {"cart-updated":{"count":3},"toast":[{"level":"success","message":"..."}]}
/// ```
#[must_use]
pub fn hx_trigger(cart_count: u32, toasts: &[Notification]) -> Option<HeaderValue> {
    let mut events = json!({ "cart-updated": { "count": cart_count } });
    if !toasts.is_empty() {
        events["toast"] = json!(toasts);
    }

    match HeaderValue::from_str(&ascii_json(&events.to_string())) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(error = %e, "Toast payload is not a valid header value");
            None
        }
    }
}

/// Escape non-ASCII characters and DEL as JSON `\uXXXX` sequences.
///
/// Header values must be visible ASCII, product names need not be. Other
/// control characters are already escaped by `serde_json`.
fn ascii_json(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() && c != '\u{7f}' {
            escaped.push(c);
        } else {
            let mut units = [0_u16; 2];
            for unit in c.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    escaped
}
