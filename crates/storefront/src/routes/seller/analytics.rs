//! Seller analytics page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::routes::layout::LayoutView;
use crate::routes::seller::{NavItem, nav};

/// An analytics panel with nothing to chart yet.
#[derive(Clone)]
pub struct PanelView {
    pub title: &'static str,
    pub empty_message: &'static str,
    pub wide: bool,
}

const PANELS: &[PanelView] = &[
    PanelView {
        title: "Sales Overview",
        empty_message: "No sales data available yet",
        wide: false,
    },
    PanelView {
        title: "Top Products",
        empty_message: "Start selling to see your top products",
        wide: false,
    },
    PanelView {
        title: "Revenue by Month",
        empty_message: "Historical data will appear here once you make sales",
        wide: true,
    },
];

/// Seller analytics template.
#[derive(Template, WebTemplate)]
#[template(path = "seller/analytics.html")]
pub struct SellerAnalyticsTemplate {
    pub layout: LayoutView,
    pub nav: Vec<NavItem>,
    pub panels: Vec<PanelView>,
}

/// Display the analytics panels.
#[instrument(skip(session))]
pub async fn index(session: Session) -> impl IntoResponse {
    SellerAnalyticsTemplate {
        layout: LayoutView::for_session(&session).await,
        nav: nav("/seller/analytics"),
        panels: PANELS.to_vec(),
    }
}
