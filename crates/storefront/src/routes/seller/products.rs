//! Seller product management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use essence_core::Notification;

use crate::error::Result;
use crate::filters;
use crate::forms::{FormErrors, ProductForm, SelectOption, category_options};
use crate::routes::layout::LayoutView;
use crate::routes::seller::{NavItem, nav};
use crate::services::notifications::push_flash;
use crate::services::simulate_round_trip;
use crate::state::AppState;

const PRODUCTS_PATH: &str = "/seller/products";

/// Placeholder image shown in the product form.
const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400/png";

/// A row in the seller's product table.
#[derive(Clone)]
pub struct SellerProductView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: String,
    pub stock: u32,
}

/// Search box query.
#[derive(Debug, Default, Deserialize)]
pub struct SellerProductQuery {
    pub q: Option<String>,
}

/// Rows whose name contains `query`, case-insensitively.
fn matching(products: Vec<SellerProductView>, query: &str) -> Vec<SellerProductView> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return products;
    }
    products
        .into_iter()
        .filter(|product| product.name.to_lowercase().contains(&query))
        .collect()
}

/// Seller product list template.
#[derive(Template, WebTemplate)]
#[template(path = "seller/products.html")]
pub struct SellerProductsTemplate {
    pub layout: LayoutView,
    pub nav: Vec<NavItem>,
    pub products: Vec<SellerProductView>,
    pub query: String,
}

/// Add/edit product template.
#[derive(Template, WebTemplate)]
#[template(path = "seller/product_form.html")]
pub struct ProductFormTemplate {
    pub layout: LayoutView,
    pub nav: Vec<NavItem>,
    pub title: &'static str,
    pub action: String,
    pub submit_label: &'static str,
    pub form: ProductForm,
    pub errors: FormErrors,
    pub categories: Vec<SelectOption>,
    pub images: Vec<String>,
}

impl ProductFormTemplate {
    async fn new_product(session: &Session, form: ProductForm, errors: FormErrors) -> Self {
        Self {
            layout: LayoutView::for_session(session).await,
            nav: nav(PRODUCTS_PATH),
            title: "Add New Product",
            action: "/seller/add-product".to_string(),
            submit_label: "Create Product",
            categories: category_options(&form.category),
            form,
            errors,
            images: Vec::new(),
        }
    }

    async fn edit(session: &Session, id: &str, form: ProductForm, errors: FormErrors) -> Self {
        Self {
            layout: LayoutView::for_session(session).await,
            nav: nav(PRODUCTS_PATH),
            title: "Edit Product",
            action: format!("/seller/edit-product/{id}"),
            submit_label: "Update Product",
            categories: category_options(&form.category),
            form,
            errors,
            images: vec![PLACEHOLDER_IMAGE.to_string()],
        }
    }
}

/// Display the seller's products.
#[instrument(skip(session))]
pub async fn index(session: Session, Query(query): Query<SellerProductQuery>) -> impl IntoResponse {
    let query = query.q.unwrap_or_default();

    SellerProductsTemplate {
        layout: LayoutView::for_session(&session).await,
        nav: nav(PRODUCTS_PATH),
        products: matching(Vec::new(), &query),
        query,
    }
}

/// Delete a product. The mock catalog has nothing to delete.
#[instrument]
pub async fn delete(Path(id): Path<String>) -> Redirect {
    tracing::info!(product_id = %id, "Seller product deleted");
    Redirect::to(PRODUCTS_PATH)
}

/// Display the add product form.
#[instrument(skip(session))]
pub async fn new_product(session: Session) -> impl IntoResponse {
    ProductFormTemplate::new_product(&session, ProductForm::default(), FormErrors::new()).await
}

/// Create a product.
#[instrument(skip(state, session, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let errors = form.errors();
    if !errors.is_empty() {
        let page = ProductFormTemplate::new_product(&session, form, errors).await;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    simulate_round_trip("create_product", state.config().simulated_latency).await;
    tracing::info!(name = %form.name.trim(), "Seller product created");

    push_flash(
        &session,
        vec![
            Notification::success("Your product has been created successfully.")
                .with_title("Product Created"),
        ],
    )
    .await?;
    Ok(Redirect::to(PRODUCTS_PATH).into_response())
}

/// Display the edit form, pre-filled with the sample product.
#[instrument(skip(session))]
pub async fn edit(session: Session, Path(id): Path<String>) -> impl IntoResponse {
    ProductFormTemplate::edit(&session, &id, ProductForm::sample(), FormErrors::new()).await
}

/// Update a product.
#[instrument(skip(state, session, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let errors = form.errors();
    if !errors.is_empty() {
        let page = ProductFormTemplate::edit(&session, &id, form, errors).await;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    simulate_round_trip("update_product", state.config().simulated_latency).await;
    tracing::info!(product_id = %id, "Seller product updated");

    push_flash(
        &session,
        vec![
            Notification::success("Your product has been updated successfully.")
                .with_title("Product Updated"),
        ],
    )
    .await?;
    Ok(Redirect::to(PRODUCTS_PATH).into_response())
}
