//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Renders a star rating out of 5 as filled and empty stars.
///
/// Usage in templates: `{{ product.rating|stars }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn stars(rating: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let rating: f32 = rating.to_string().parse().unwrap_or(0.0);
    let filled = (1..=5_u8).filter(|star| f32::from(*star) <= rating.round()).count();
    Ok(format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled)))
}
