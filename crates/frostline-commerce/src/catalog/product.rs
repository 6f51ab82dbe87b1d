//! Product types.

use crate::ids::{BrandId, CategoryId, ProductId};
use serde::{Deserialize, Serialize};

/// Product visibility in the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductStatus {
    /// Product is in draft mode, not visible to customers.
    Draft,
    /// Product is active and visible.
    #[default]
    Active,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Active => "active",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(ProductStatus::Draft),
            "active" => Some(ProductStatus::Active),
            _ => None,
        }
    }
}

/// A spare part in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Stock keeping unit (unique within the catalog).
    pub sku: String,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Technical data payload interpreted by the specification codec.
    pub specifications: String,
    /// Root category this product belongs to.
    pub category_id: CategoryId,
    /// Optional sub-category; must be a child of `category_id`.
    pub sub_category_id: Option<CategoryId>,
    /// Brands associated with this product.
    pub brand_ids: Vec<BrandId>,
    /// Product image URL.
    pub image: String,
    /// Product visibility status.
    pub status: ProductStatus,
    /// Optional technical datasheet URL.
    pub pdf: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Product {
    /// Create a new active product in a category.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        category_id: CategoryId,
    ) -> Self {
        Self {
            id: ProductId::generate(),
            sku: sku.into(),
            name: name.into(),
            description: String::new(),
            specifications: String::new(),
            category_id,
            sub_category_id: None,
            brand_ids: Vec::new(),
            image: String::new(),
            status: ProductStatus::Active,
            pdf: None,
            created_at: current_timestamp(),
        }
    }

    /// Check if the product is visible to customers.
    pub fn is_visible(&self) -> bool {
        self.status == ProductStatus::Active
    }

    /// The brand chosen to represent this product when the persistence
    /// layer only supports a single brand column. First id wins.
    pub fn primary_brand(&self) -> Option<&BrandId> {
        self.brand_ids.first()
    }

    /// Add a brand association, skipping duplicates.
    pub fn add_brand(&mut self, brand_id: BrandId) {
        if !self.brand_ids.contains(&brand_id) {
            self.brand_ids.push(brand_id);
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
