//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use essence_core::catalog::{DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE, DEFAULT_RELATED_COUNT};
use essence_core::{Cart, Product, ProductFilter, ProductId};

use crate::filters;
use crate::routes::layout::LayoutView;
use crate::routes::not_found;
use crate::services::CartContainer;
use crate::state::AppState;

/// Products with fewer units than this show a low-stock note.
const LOW_STOCK_THRESHOLD: u32 = 10;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image: String,
    pub rating: String,
    pub in_stock: bool,
    pub in_cart: bool,
}

impl ProductCardView {
    /// Card for `product`, marked when the shopper already has it in `cart`.
    #[must_use]
    pub fn new(product: &Product, cart: &Cart) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.display_price().to_string(),
            image: product.primary_image().to_string(),
            rating: format!("{:.1}", product.rating),
            in_stock: product.in_stock(),
            in_cart: cart.get(&product.id).is_some(),
        }
    }
}

/// Cards for `products` against the shopper's cart.
#[must_use]
pub fn product_cards(products: Vec<&Product>, cart: &Cart) -> Vec<ProductCardView> {
    products
        .into_iter()
        .map(|product| ProductCardView::new(product, cart))
        .collect()
}

/// Product detail display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub images: Vec<String>,
    pub rating: String,
    pub stock: u32,
    pub in_stock: bool,
    pub low_stock: bool,
    pub in_cart: bool,
    /// e.g. "2 units", empty when not in the cart.
    pub in_cart_units: String,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, cart: &Cart) -> Self {
        let in_cart_quantity = cart.get(&product.id).map(|item| item.quantity);

        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.display_price().to_string(),
            images: product.images.clone(),
            rating: format!("{:.1}", product.rating),
            stock: product.stock,
            in_stock: product.in_stock(),
            low_stock: product.in_stock() && product.stock < LOW_STOCK_THRESHOLD,
            in_cart: in_cart_quantity.is_some(),
            in_cart_units: in_cart_quantity.map_or_else(String::new, units),
        }
    }
}

/// "1 unit", "3 units".
fn units(quantity: u32) -> String {
    if quantity == 1 {
        "1 unit".to_string()
    } else {
        format!("{quantity} units")
    }
}

/// A category in the listing sidebar.
#[derive(Clone)]
pub struct CategoryOption {
    pub name: String,
    pub selected: bool,
}

/// Listing filters as submitted by the sidebar form.
///
/// Everything arrives as text so blank or mistyped inputs fall back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl ProductQuery {
    /// Convert to catalog filters. A reversed price range is swapped.
    #[must_use]
    pub fn to_filter(&self) -> ProductFilter {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string)
        };
        let price = |value: &Option<String>, default: Decimal| {
            value
                .as_deref()
                .and_then(|v| v.trim().parse::<Decimal>().ok())
                .filter(|v| !v.is_sign_negative())
                .unwrap_or(default)
        };

        let min_price = price(&self.min_price, DEFAULT_MIN_PRICE);
        let max_price = price(&self.max_price, DEFAULT_MAX_PRICE);

        ProductFilter {
            query: non_blank(&self.q),
            category: non_blank(&self.category).filter(|c| c != "all"),
            min_price: min_price.min(max_price),
            max_price: max_price.max(min_price),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: LayoutView,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryOption>,
    pub query: String,
    pub min_price: String,
    pub max_price: String,
    pub filtered: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: LayoutView,
    pub product: ProductView,
    pub related_products: Vec<ProductCardView>,
}

/// Display product listing page.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ProductQuery>,
) -> impl IntoResponse {
    let filter = query.to_filter();
    let catalog = state.catalog();
    let cart = CartContainer::from_session(&session).await;

    let products = product_cards(catalog.search(&filter), cart.cart());
    tracing::debug!(results = products.len(), "Filtered product listing");

    let categories = catalog
        .categories()
        .into_iter()
        .map(|name| CategoryOption {
            selected: filter.category.as_deref() == Some(name),
            name: name.to_string(),
        })
        .collect();

    ProductsIndexTemplate {
        layout: LayoutView::new(&session, cart.total_items()).await,
        products,
        categories,
        query: filter.query.clone().unwrap_or_default(),
        min_price: filter.min_price.normalize().to_string(),
        max_price: filter.max_price.normalize().to_string(),
        filtered: filter != ProductFilter::default(),
    }
}

/// Display product detail page.
///
/// Unknown IDs render the 404 page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Response {
    let id = ProductId::new(id);
    let catalog = state.catalog();

    let Some(product) = catalog.get(&id) else {
        return not_found::page(
            &session,
            "Product Not Found",
            "The product you're looking for doesn't exist or has been removed.",
        )
        .await;
    };

    let cart = CartContainer::from_session(&session).await;
    let related_products = product_cards(catalog.related(&id, DEFAULT_RELATED_COUNT), cart.cart());

    ProductShowTemplate {
        layout: LayoutView::new(&session, cart.total_items()).await,
        product: ProductView::new(product, cart.cart()),
        related_products,
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(q: &str, category: &str, min: &str, max: &str) -> ProductQuery {
        ProductQuery {
            q: Some(q.to_string()),
            category: Some(category.to_string()),
            min_price: Some(min.to_string()),
            max_price: Some(max.to_string()),
        }
    }

    #[test]
    fn test_empty_query_is_default_filter() {
        assert_eq!(ProductQuery::default().to_filter(), ProductFilter::default());
        assert_eq!(
            query("  ", "all", "", "abc").to_filter(),
            ProductFilter::default()
        );
    }

    #[test]
    fn test_query_values_are_used() {
        let filter = query("lamp", "Lighting", "10", "150.50").to_filter();
        assert_eq!(filter.query.as_deref(), Some("lamp"));
        assert_eq!(filter.category.as_deref(), Some("Lighting"));
        assert_eq!(filter.min_price, Decimal::new(10, 0));
        assert_eq!(filter.max_price, Decimal::new(15050, 2));
    }

    #[test]
    fn test_reversed_price_range_is_swapped() {
        let filter = query("", "", "120", "40").to_filter();
        assert_eq!(filter.min_price, Decimal::new(40, 0));
        assert_eq!(filter.max_price, Decimal::new(120, 0));
    }

    #[test]
    fn test_negative_price_uses_default() {
        let filter = query("", "", "-5", "").to_filter();
        assert_eq!(filter.min_price, DEFAULT_MIN_PRICE);
    }

    fn lamp() -> Product {
        serde_json::from_str(
            r#"{"id":"1","name":"Desk Lamp","description":"Adjustable arm and dimmable LED.","price":129.99,"category":"Lighting","images":["lamp.jpg"],"rating":4.8,"stock":15}"#,
        )
        .unwrap_or_else(|e| panic!("fixture: {e}"))
    }

    #[test]
    fn test_views_mark_products_in_cart() {
        let product = lamp();
        let mut cart = Cart::new();
        assert!(!ProductCardView::new(&product, &cart).in_cart);
        assert!(!ProductView::new(&product, &cart).in_cart);

        cart.add(product.to_line_item(1));
        assert!(ProductCardView::new(&product, &cart).in_cart);
        assert_eq!(ProductView::new(&product, &cart).in_cart_units, "1 unit");

        cart.add(product.to_line_item(2));
        let view = ProductView::new(&product, &cart);
        assert!(view.in_cart);
        assert_eq!(view.in_cart_units, "3 units");
    }
}
