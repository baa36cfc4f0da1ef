//! Seller dashboard route handlers.
//!
//! The dashboard works against mock data: the seller's catalog and order
//! book start (and stay) empty, and submissions are simulated.

pub mod analytics;
pub mod orders;
pub mod products;

/// Sidebar entries: label, path.
pub const NAV_ITEMS: &[(&str, &str)] = &[
    ("Products", "/seller/products"),
    ("Orders", "/seller/orders"),
    ("Analytics", "/seller/analytics"),
    ("Settings", "/account?tab=seller"),
];

/// A sidebar link with its active state.
#[derive(Clone)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Sidebar links with `active_path` highlighted.
#[must_use]
pub fn nav(active_path: &str) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .map(|&(label, path)| NavItem {
            label,
            path,
            active: path == active_path,
        })
        .collect()
}
