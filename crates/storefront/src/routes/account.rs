//! Account route handlers.
//!
//! The account page has three tabs: personal information, order history and
//! seller registration. There is no sign-in; every session starts as the same
//! demo shopper and edits are kept in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use essence_core::Notification;

use crate::error::Result;
use crate::filters;
use crate::forms::{FormErrors, ProfileForm, SelectOption, SellerForm, category_options};
use crate::models::{ProfileDetails, SellerAccount, session_keys};
use crate::routes::layout::LayoutView;
use crate::services::notifications::push_flash;
use crate::services::simulate_round_trip;
use crate::state::AppState;

/// Account page tabs.
const TABS: &[&str] = &["profile", "orders", "seller"];

/// Tab selection query.
#[derive(Debug, Default, Deserialize)]
pub struct AccountQuery {
    pub tab: Option<String>,
}

/// Seller summary shown once registered.
#[derive(Clone)]
pub struct SellerView {
    pub business_name: String,
    pub category: String,
    pub product_count: u32,
    pub order_count: u32,
    pub sales: String,
}

impl From<&SellerAccount> for SellerView {
    fn from(account: &SellerAccount) -> Self {
        let category = category_options(&account.category)
            .into_iter()
            .find(|option| option.selected)
            .map_or_else(|| account.category.clone(), |option| option.label.to_string());

        Self {
            business_name: account.business_name.clone(),
            category,
            product_count: 0,
            order_count: 0,
            sales: "$0.00".to_string(),
        }
    }
}

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub layout: LayoutView,
    pub tab: &'static str,
    pub profile: ProfileForm,
    pub profile_errors: FormErrors,
    pub seller: Option<SellerView>,
    pub seller_form: SellerForm,
    pub seller_errors: FormErrors,
    pub categories: Vec<SelectOption>,
}

impl AccountTemplate {
    /// Page state from the session, with clean forms on `tab`.
    async fn load(session: &Session, tab: &'static str) -> Result<Self> {
        let profile = session
            .get::<ProfileDetails>(session_keys::PROFILE)
            .await?
            .unwrap_or_default();
        let seller = session.get::<SellerAccount>(session_keys::SELLER).await?;

        Ok(Self {
            layout: LayoutView::for_session(session).await,
            tab,
            profile: ProfileForm::from(&profile),
            profile_errors: FormErrors::new(),
            seller: seller.as_ref().map(SellerView::from),
            seller_form: SellerForm::default(),
            seller_errors: FormErrors::new(),
            categories: category_options(""),
        })
    }
}

/// Resolve a requested tab, defaulting to the profile.
fn tab_for(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|tab| TABS.iter().copied().find(|known| *known == tab))
        .unwrap_or("profile")
}

/// Display the account page.
#[instrument(skip(session))]
pub async fn index(session: Session, Query(query): Query<AccountQuery>) -> Result<Response> {
    let page = AccountTemplate::load(&session, tab_for(query.tab.as_deref())).await?;
    Ok(page.into_response())
}

/// Update personal information.
#[instrument(skip(state, session, form))]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> Result<Response> {
    let errors = form.errors();
    if !errors.is_empty() {
        let mut page = AccountTemplate::load(&session, "profile").await?;
        page.profile = form;
        page.profile_errors = errors;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    simulate_round_trip("update_profile", state.config().simulated_latency).await;
    session
        .insert(session_keys::PROFILE, form.into_details())
        .await?;
    tracing::info!("Profile updated");

    push_flash(
        &session,
        vec![
            Notification::success("Your profile information has been updated successfully.")
                .with_title("Profile Updated"),
        ],
    )
    .await?;
    Ok(Redirect::to("/account").into_response())
}

/// Register the shopper as a seller.
#[instrument(skip(state, session, form))]
pub async fn become_seller(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SellerForm>,
) -> Result<Response> {
    let errors = form.errors();
    if !errors.is_empty() {
        let mut page = AccountTemplate::load(&session, "seller").await?;
        page.categories = category_options(&form.category);
        page.seller_form = form;
        page.seller_errors = errors;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    simulate_round_trip("register_seller", state.config().simulated_latency).await;
    let account = form.into_account();
    tracing::info!(category = %account.category, "Seller account created");
    session.insert(session_keys::SELLER, account).await?;

    push_flash(
        &session,
        vec![
            Notification::success("Your seller account has been created successfully.")
                .with_title("Seller Account Created"),
        ],
    )
    .await?;
    Ok(Redirect::to("/account?tab=seller").into_response())
}
