//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Home page (hero + featured products)
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (session store)
//!
//! # Products
//! GET  /products                      - Listing (?q=&category=&min_price=&max_price=)
//! GET  /product/{id}                  - Product detail + related products
//!
//! # Cart (HTMX fragments, redirects without JS)
//! GET  /cart                          - Cart page
//! POST /cart/add                      - Add to cart (count badge fragment)
//! POST /cart/update                   - Update quantity (cart_items fragment)
//! POST /cart/remove                   - Remove item (cart_items fragment)
//! POST /cart/clear                    - Empty the cart (cart_items fragment)
//! GET  /cart/count                    - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout                      - Checkout form (redirects to /cart when empty)
//! POST /checkout                      - Place order (simulated)
//!
//! # Account
//! GET  /account                       - Profile, orders and seller tabs
//! POST /account/profile               - Update profile (simulated)
//! POST /account/seller                - Become a seller (simulated)
//!
//! # Seller dashboard
//! GET  /seller/products               - Seller product list (?q=)
//! POST /seller/products/{id}/delete   - Delete product
//! GET  /seller/add-product            - Add product form
//! POST /seller/add-product            - Create product (simulated)
//! GET  /seller/edit-product/{id}      - Edit product form
//! POST /seller/edit-product/{id}      - Update product (simulated)
//! GET  /seller/orders                 - Orders
//! GET  /seller/analytics              - Analytics
//! ```

pub mod account;
pub mod cart;
pub mod checkout;
pub mod health;
pub mod home;
pub mod layout;
pub mod not_found;
pub mod products;
pub mod seller;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::index))
        .route("/profile", post(account::update_profile))
        .route("/seller", post(account::become_seller))
}

/// Create the seller dashboard routes router.
pub fn seller_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(seller::products::index))
        .route("/products/{id}/delete", post(seller::products::delete))
        .route(
            "/add-product",
            get(seller::products::new_product).post(seller::products::create),
        )
        .route(
            "/edit-product/{id}",
            get(seller::products::edit).post(seller::products::update),
        )
        .route("/orders", get(seller::orders::index))
        .route("/analytics", get(seller::analytics::index))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/products", get(products::index))
        .route("/product/{id}", get(products::show))
        .nest("/cart", cart_routes())
        .route(
            "/checkout",
            get(checkout::show).post(checkout::place_order),
        )
        .nest("/account", account_routes())
        .nest("/seller", seller_routes())
}
