//! Catalog error types.

use thiserror::Error;

/// Errors that can occur in catalog and quote operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Bad or missing required input, caught before any side effect.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A product with an equivalent SKU already exists.
    #[error("SKU already in use: {0}")]
    SkuConflict(String),

    /// A product references a category that does not exist or is not a root.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// A product references a sub-category that does not exist.
    #[error("Unknown sub-category: {0}")]
    UnknownSubCategory(String),

    /// A sub-category was assigned outside its parent category.
    #[error("Sub-category {sub} is not a child of category {parent}")]
    SubCategoryOutsideParent { sub: String, parent: String },

    /// A product references a brand that does not exist.
    #[error("Unknown brand: {0}")]
    UnknownBrand(String),

    /// Category deletion blocked: products still reference it.
    #[error("Category {0} is still referenced by products")]
    CategoryInUse(String),

    /// Category deletion blocked: sub-categories still reference it.
    #[error("Category {0} still has sub-categories")]
    CategoryHasChildren(String),

    /// Brand deletion blocked: products still reference it.
    #[error("Brand {0} is still referenced by products")]
    BrandInUse(String),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Brand not found.
    #[error("Brand not found: {0}")]
    BrandNotFound(String),

    /// Quote request not found.
    #[error("Quote not found: {0}")]
    QuoteNotFound(String),

    /// Contact message not found.
    #[error("Contact message not found: {0}")]
    MessageNotFound(String),

    /// Backend read/write failure; in-memory state is left at last known-good.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Operation requires an admin session.
    #[error("Operation not permitted for this session")]
    Unauthorized,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    /// True for errors caught before any side effect (bad input).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CatalogError::Validation(_)
                | CatalogError::SkuConflict(_)
                | CatalogError::UnknownCategory(_)
                | CatalogError::UnknownSubCategory(_)
                | CatalogError::SubCategoryOutsideParent { .. }
                | CatalogError::UnknownBrand(_)
        )
    }

    /// True when a referenced entity no longer resolves.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::ProductNotFound(_)
                | CatalogError::CategoryNotFound(_)
                | CatalogError::BrandNotFound(_)
                | CatalogError::QuoteNotFound(_)
                | CatalogError::MessageNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(CatalogError::Validation("name is required".into()).is_validation());
        assert!(CatalogError::SkuConflict("FRZ-100".into()).is_validation());
        assert!(!CatalogError::Persistence("timeout".into()).is_validation());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(CatalogError::ProductNotFound("p1".into()).is_not_found());
        assert!(!CatalogError::Unauthorized.is_not_found());
    }
}
