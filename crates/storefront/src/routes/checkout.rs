//! Checkout route handlers.
//!
//! Placing an order is simulated: after a fixed delay the order always
//! succeeds, the cart is cleared and the shopper lands on the home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use essence_core::{Notification, OrderId};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::forms::{CheckoutForm, FormErrors};
use crate::routes::cart::CartView;
use crate::routes::layout::LayoutView;
use crate::services::notifications::push_flash;
use crate::services::{CartContainer, ToastQueue, simulate_round_trip};
use crate::state::AppState;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub layout: LayoutView,
    pub cart: CartView,
    pub form: CheckoutForm,
    pub errors: FormErrors,
}

/// Display the checkout form. An empty cart goes back to the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Response {
    let cart = CartContainer::from_session(&session).await;
    if cart.items().is_empty() {
        return Redirect::to("/cart").into_response();
    }

    CheckoutTemplate {
        layout: LayoutView::new(&session, cart.total_items()).await,
        cart: CartView::from_container(&cart),
        form: CheckoutForm::blank(),
        errors: FormErrors::new(),
    }
    .into_response()
}

/// Place the order.
///
/// Invalid details re-render the form with status 422.
#[instrument(skip(state, session, form))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut cart = CartContainer::from_session(&session).await;
    if cart.items().is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let errors = form.errors();
    if !errors.is_empty() {
        tracing::debug!(fields = errors.len(), "Checkout form rejected");
        let template = CheckoutTemplate {
            layout: LayoutView::new(&session, cart.total_items()).await,
            cart: CartView::from_container(&cart),
            form,
            errors,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
    }

    simulate_round_trip("place_order", state.config().simulated_latency).await;

    let order_id = OrderId::new(format!("ORD-{}", Uuid::new_v4().simple()));
    let summary = cart.summary();
    tracing::info!(
        order_id = %order_id,
        items = cart.total_items(),
        total = %summary.total,
        "Order placed"
    );
    add_breadcrumb("checkout", "Order placed", Some(&[("order_id", order_id.as_str())]));

    let toasts = ToastQueue::new();
    cart.subscribe(toasts.subscriber());
    cart.clear().await;
    toasts.push(Notification::success("Order placed successfully!"));

    push_flash(&session, toasts.take()).await?;
    Ok(Redirect::to("/").into_response())
}
