//! Seller orders page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::routes::layout::LayoutView;
use crate::routes::seller::{NavItem, nav};

/// Seller orders template.
#[derive(Template, WebTemplate)]
#[template(path = "seller/orders.html")]
pub struct SellerOrdersTemplate {
    pub layout: LayoutView,
    pub nav: Vec<NavItem>,
}

/// Display the (empty) order list.
#[instrument(skip(session))]
pub async fn index(session: Session) -> impl IntoResponse {
    SellerOrdersTemplate {
        layout: LayoutView::for_session(&session).await,
        nav: nav("/seller/orders"),
    }
}
