//! The product catalog and its query helpers.
//!
//! The catalog is a static list loaded once at startup. Every query is a
//! linear scan that preserves catalog order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::LineItem;
use crate::types::{Price, ProductId};

/// Number of related products shown on a product page.
pub const DEFAULT_RELATED_COUNT: usize = 4;

/// Lower bound of the listing page's default price range.
pub const DEFAULT_MIN_PRICE: Decimal = Decimal::ZERO;

/// Upper bound of the listing page's default price range ($200).
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Errors raised while loading the catalog fixture.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The fixture is not valid JSON for a product list.
    #[error("invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two products share an ID.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    /// A product has no images.
    #[error("product {0} has no images")]
    MissingImage(ProductId),
}

/// A product for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub images: Vec<String>,
    /// Average review score out of 5.
    pub rating: f32,
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// The first image, used on cards and in the cart.
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.images.first().map_or("", String::as_str)
    }

    #[must_use]
    pub const fn display_price(&self) -> Price {
        Price::usd(self.price)
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Snapshot this product as a cart line item.
    #[must_use]
    pub fn to_line_item(&self, quantity: u32) -> LineItem {
        LineItem::new(
            self.id.clone(),
            self.name.clone(),
            self.price,
            self.primary_image(),
            quantity,
        )
    }
}

/// Listing page filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive text matched against name and description.
    pub query: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Decimal,
    /// Inclusive upper price bound.
    pub max_price: Decimal,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            query: None,
            category: None,
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
        }
    }
}

impl ProductFilter {
    /// Returns `true` if the product passes every filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let matches_query = self.query.as_deref().map(str::trim).is_none_or(|query| {
            let query = query.to_lowercase();
            product.name.to_lowercase().contains(&query)
                || product.description.to_lowercase().contains(&query)
        });
        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|category| product.category == category);
        let matches_price = product.price >= self.min_price && product.price <= self.max_price;

        matches_query && matches_category && matches_price
    }
}

/// The in-memory product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate IDs and products without images.
    ///
    /// # Errors
    ///
    /// Returns an error if two products share an ID or a product has no images.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        for (index, product) in products.iter().enumerate() {
            if product.images.is_empty() {
                return Err(CatalogError::MissingImage(product.id.clone()));
            }
            if products
                .iter()
                .take(index)
                .any(|earlier| earlier.id == product.id)
            {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or the products fail validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Fetch a product by identifier.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Products flagged as featured.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|product| product.featured).collect()
    }

    /// Other products in the same category, capped at `count`.
    ///
    /// Returns nothing for an unknown ID.
    #[must_use]
    pub fn related(&self, id: &ProductId, count: usize) -> Vec<&Product> {
        let Some(current) = self.get(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|product| &product.id != id && product.category == current.category)
            .take(count)
            .collect()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Products passing the listing filters.
    #[must_use]
    pub fn search(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product))
            .collect()
    }
}
