//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::routes::layout::LayoutView;
use crate::routes::products::{ProductCardView, product_cards};
use crate::services::CartContainer;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: LayoutView,
    pub featured: Vec<ProductCardView>,
    pub categories: Vec<String>,
}

/// Display the home page: hero, featured products and category links.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let catalog = state.catalog();
    let cart = CartContainer::from_session(&session).await;

    HomeTemplate {
        layout: LayoutView::new(&session, cart.total_items()).await,
        featured: product_cards(catalog.featured(), cart.cart()),
        categories: catalog
            .categories()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    }
}
