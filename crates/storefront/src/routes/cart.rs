//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation goes through a [`CartContainer`] restored from the session;
//! its notifications reach the shopper as an `HX-Trigger` header on HTMX
//! requests, or as flash messages behind a redirect otherwise.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use essence_core::{LineItem, Price, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::routes::layout::LayoutView;
use crate::services::notifications::{HX_TRIGGER, hx_trigger, push_flash};
use crate::services::{CartContainer, CartStore, SessionCartStore, ToastQueue};
use crate::state::AppState;

/// Where non-HTMX cart forms land when they name no valid destination.
const DEFAULT_REDIRECT: &str = "/cart";

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub decrement: u32,
    pub increment: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            decrement: item.quantity.saturating_sub(1),
            increment: item.quantity.saturating_add(1),
            price: item.unit_price().to_string(),
            line_price: Price::usd(item.line_total()).to_string(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: String,
    pub shipping: String,
    pub free_shipping: bool,
    pub tax: String,
    pub total: String,
}

impl CartView {
    /// Snapshot the container's items and derived totals.
    #[must_use]
    pub fn from_container<S: CartStore>(cart: &CartContainer<S>) -> Self {
        let summary = cart.summary();
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            item_count: cart.total_items(),
            subtotal: Price::usd(summary.subtotal).to_string(),
            shipping: Price::usd(summary.shipping).to_string(),
            free_shipping: summary.free_shipping(),
            tax: Price::usd(summary.tax).to_string(),
            total: Price::usd(summary.total).to_string(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
///
/// Quantities are signed so a negative value from a hand-edited form is
/// handled by the cart rules instead of failing to deserialize.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub redirect_to: Option<String>,
}

const fn default_quantity() -> i64 {
    1
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub quantity: i64,
    pub redirect_to: Option<String>,
}

/// Clamp a submitted quantity into the cart's range. Anything below one
/// becomes zero, which the cart treats as "remove" on update and "one" on add.
#[must_use]
pub fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(0)).unwrap_or(u32::MAX)
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
    pub redirect_to: Option<String>,
}

/// Clear cart form data.
#[derive(Debug, Default, Deserialize)]
pub struct ClearCartForm {
    pub redirect_to: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: LayoutView,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Response Helpers
// =============================================================================

/// Whether the request was issued by HTMX.
#[must_use]
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Accept only same-site absolute paths as redirect targets.
#[must_use]
pub fn safe_redirect(target: Option<&str>) -> &str {
    match target {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => DEFAULT_REDIRECT,
    }
}

/// Deliver queued toasts and build the response for a cart mutation.
///
/// HTMX requests get `fragment` plus an `HX-Trigger` header carrying the new
/// count and the toasts. Other requests get the toasts as flash messages and
/// a redirect.
async fn respond(
    session: &Session,
    headers: &HeaderMap,
    toasts: &ToastQueue,
    count: u32,
    redirect_to: Option<&str>,
    fragment: impl IntoResponse,
) -> Result<Response> {
    let notifications = toasts.take();

    if is_htmx(headers) {
        let mut response = fragment.into_response();
        if let Some(value) = hx_trigger(count, &notifications) {
            response.headers_mut().insert(HX_TRIGGER, value);
        }
        return Ok(response);
    }

    push_flash(session, notifications).await?;
    Ok(Redirect::to(safe_redirect(redirect_to)).into_response())
}

/// Restore the session cart with a toast queue subscribed to it.
async fn session_cart(session: &Session) -> (CartContainer<SessionCartStore>, ToastQueue) {
    let toasts = ToastQueue::new();
    let mut cart = CartContainer::from_session(session).await;
    cart.subscribe(toasts.subscriber());
    (cart, toasts)
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = CartContainer::from_session(&session).await;

    CartShowTemplate {
        layout: LayoutView::new(&session, cart.total_items()).await,
        cart: CartView::from_container(&cart),
    }
}

/// Add item to cart.
///
/// Unknown product IDs are rejected with 404. Returns the cart count badge
/// for HTMX requests.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.id);
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let (mut cart, toasts) = session_cart(&session).await;
    cart.add(product.to_line_item(clamp_quantity(form.quantity)))
        .await;
    add_breadcrumb("cart", "Added item", Some(&[("product_id", id.as_str())]));

    let count = cart.total_items();
    respond(
        &session,
        &headers,
        &toasts,
        count,
        form.redirect_to.as_deref(),
        CartCountTemplate { count },
    )
    .await
}

/// Update cart item quantity. A quantity of zero removes the item.
#[instrument(skip(session, headers))]
pub async fn update(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let (mut cart, toasts) = session_cart(&session).await;
    cart.update_quantity(&ProductId::new(form.id), clamp_quantity(form.quantity))
        .await;

    let count = cart.total_items();
    let fragment = CartItemsTemplate {
        cart: CartView::from_container(&cart),
    };
    respond(
        &session,
        &headers,
        &toasts,
        count,
        form.redirect_to.as_deref(),
        fragment,
    )
    .await
}

/// Remove item from cart.
#[instrument(skip(session, headers))]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let (mut cart, toasts) = session_cart(&session).await;
    cart.remove(&ProductId::new(form.id)).await;

    let count = cart.total_items();
    let fragment = CartItemsTemplate {
        cart: CartView::from_container(&cart),
    };
    respond(
        &session,
        &headers,
        &toasts,
        count,
        form.redirect_to.as_deref(),
        fragment,
    )
    .await
}

/// Remove every item from the cart.
#[instrument(skip(session, headers))]
pub async fn clear(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ClearCartForm>,
) -> Result<Response> {
    let (mut cart, toasts) = session_cart(&session).await;
    cart.clear().await;

    let fragment = CartItemsTemplate {
        cart: CartView::from_container(&cart),
    };
    respond(
        &session,
        &headers,
        &toasts,
        0,
        form.redirect_to.as_deref(),
        fragment,
    )
    .await
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = CartContainer::from_session(&session).await;
    CartCountTemplate {
        count: cart.total_items(),
    }
}
