//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use essence_core::{Catalog, CatalogError};

use crate::config::StorefrontConfig;

/// The product fixture shipped with the storefront.
const CATALOG_FIXTURE: &str = include_str!("../content/products.json");

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration, the product catalog and the session database.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    session_pool: Option<SqlitePool>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product catalog
    /// * `session_pool` - Pool backing the session store, when sessions are
    ///   persisted to `SQLite` (checked by `/health/ready`)
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        session_pool: Option<SqlitePool>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                session_pool,
            }),
        }
    }

    /// Create state with the bundled product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled catalog fixture is invalid.
    pub fn with_bundled_catalog(
        config: StorefrontConfig,
        session_pool: Option<SqlitePool>,
    ) -> Result<Self, CatalogError> {
        let catalog = bundled_catalog()?;
        tracing::info!(products = catalog.all().len(), "Catalog loaded");
        Ok(Self::new(config, catalog, session_pool))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the session database pool, if sessions are persisted.
    #[must_use]
    pub fn session_pool(&self) -> Option<&SqlitePool> {
        self.inner.session_pool.as_ref()
    }
}

/// Parse the product fixture bundled into the binary.
///
/// # Errors
///
/// Returns an error if the fixture is invalid.
pub fn bundled_catalog() -> Result<Catalog, CatalogError> {
    Catalog::from_json(CATALOG_FIXTURE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use essence_core::ProductId;

    use super::*;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = bundled_catalog().unwrap();
        assert_eq!(catalog.all().len(), 8);
        assert_eq!(catalog.featured().len(), 4);
        assert_eq!(
            catalog.get(&ProductId::new("1")).unwrap().name,
            "Minimalist Desk Lamp"
        );
    }

    #[test]
    fn test_bundled_related_products() {
        let catalog = bundled_catalog().unwrap();
        let related: Vec<&str> = catalog
            .related(&ProductId::new("5"), 4)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(related, vec!["7", "8"]);
    }
}
