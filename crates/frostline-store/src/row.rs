//! Persistence row projection for products.
//!
//! The backend schema only has a single `brand_id` column per product,
//! while the domain model carries a full `brand_ids` list. Writing
//! collapses the list to its first entry — an intentional, documented
//! precision loss at the persistence boundary, not part of the domain
//! model. Reading widens the column back into a one-element list.

use frostline_commerce::catalog::{Product, ProductStatus};
use frostline_commerce::ids::{BrandId, CategoryId, ProductId};
use serde::{Deserialize, Serialize};

/// A product as the backend stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRow {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub specifications: String,
    pub category_id: CategoryId,
    pub sub_category_id: Option<CategoryId>,
    /// Primary brand column. See the module docs for the loss rule.
    pub brand_id: Option<BrandId>,
    pub image: String,
    pub status: ProductStatus,
    pub pdf: Option<String>,
    pub created_at: i64,
}

impl ProductRow {
    /// Project a product onto the backend schema. Brands beyond the first
    /// are dropped here, deliberately.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            specifications: product.specifications.clone(),
            category_id: product.category_id.clone(),
            sub_category_id: product.sub_category_id.clone(),
            brand_id: product.primary_brand().cloned(),
            image: product.image.clone(),
            status: product.status,
            pdf: product.pdf.clone(),
            created_at: product.created_at,
        }
    }

    /// Widen a stored row back into the domain model. The single brand
    /// column becomes a zero- or one-element list.
    pub fn into_product(self) -> Product {
        Product {
            id: self.id,
            sku: self.sku,
            name: self.name,
            description: self.description,
            specifications: self.specifications,
            category_id: self.category_id,
            sub_category_id: self.sub_category_id,
            brand_ids: self.brand_id.into_iter().collect(),
            image: self.image,
            status: self.status,
            pdf: self.pdf,
            created_at: self.created_at,
        }
    }
}
