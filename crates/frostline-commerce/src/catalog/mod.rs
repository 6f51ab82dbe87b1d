//! Normalized catalog snapshot and read-side derivations.
//!
//! A [`Catalog`] is a plain value: the service layer replaces it wholesale
//! after every successful mutation, so everything here is pure and
//! side-effect free. Hierarchy and brand lookups are O(n) scans and are
//! expected to be called on every render.

mod brand;
mod category;
mod product;

pub use brand::{Brand, BrandCatalogue, DEFAULT_LOGO_SIZE};
pub use category::Category;
pub use product::{Product, ProductStatus};

use crate::error::CatalogError;
use crate::ids::{BrandId, CategoryId, ProductId};
use crate::sku::SkuPolicy;
use serde::{Deserialize, Serialize};

/// The normalized in-memory catalog: products, categories, and brands.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    /// All products, in backend fetch order (newest first).
    pub products: Vec<Product>,
    /// All categories, roots and children mixed.
    pub categories: Vec<Category>,
    /// All brands.
    pub brands: Vec<Brand>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a product by id.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a category by id.
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Look up a brand by id.
    pub fn brand(&self, id: &BrandId) -> Option<&Brand> {
        self.brands.iter().find(|b| &b.id == id)
    }

    /// All root-level categories, in catalog order.
    pub fn root_categories(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.is_root()).collect()
    }

    /// Direct children of a category, in catalog order.
    pub fn children_of(&self, id: &CategoryId) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.parent_id.as_ref() == Some(id))
            .collect()
    }

    /// Brands referenced by a product, skipping ids that no longer resolve.
    pub fn brands_of(&self, product: &Product) -> Vec<&Brand> {
        product
            .brand_ids
            .iter()
            .filter_map(|id| self.brand(id))
            .collect()
    }

    /// Other visible products in the same root category, in catalog order.
    pub fn related_products(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.id != product.id)
            .filter(|p| p.is_visible())
            .filter(|p| p.category_id == product.category_id)
            .take(limit)
            .collect()
    }

    /// Validate a product against this snapshot.
    ///
    /// Checks required fields, SKU uniqueness under `policy` (ignoring the
    /// product's own id, so updates don't conflict with themselves), and
    /// every referential invariant: root category, sub-category parentage,
    /// and brand resolution. Fails before any side effect.
    pub fn validate_product(
        &self,
        product: &Product,
        policy: &SkuPolicy,
    ) -> Result<(), CatalogError> {
        if product.name.trim().is_empty() {
            return Err(CatalogError::Validation("product name is required".into()));
        }
        if !policy.is_valid(&product.sku) {
            return Err(CatalogError::Validation("product SKU is required".into()));
        }
        if self
            .products
            .iter()
            .any(|p| p.id != product.id && policy.matches(&p.sku, &product.sku))
        {
            return Err(CatalogError::SkuConflict(product.sku.clone()));
        }

        let category = self
            .category(&product.category_id)
            .ok_or_else(|| CatalogError::UnknownCategory(product.category_id.to_string()))?;
        if !category.is_root() {
            return Err(CatalogError::UnknownCategory(format!(
                "{} is not a root category",
                category.id
            )));
        }

        if let Some(sub_id) = &product.sub_category_id {
            let sub = self
                .category(sub_id)
                .ok_or_else(|| CatalogError::UnknownSubCategory(sub_id.to_string()))?;
            if sub.parent_id.as_ref() != Some(&product.category_id) {
                return Err(CatalogError::SubCategoryOutsideParent {
                    sub: sub_id.to_string(),
                    parent: product.category_id.to_string(),
                });
            }
        }

        for brand_id in &product.brand_ids {
            if self.brand(brand_id).is_none() {
                return Err(CatalogError::UnknownBrand(brand_id.to_string()));
            }
        }

        Ok(())
    }

    /// Validate a category against this snapshot.
    ///
    /// A set `parent_id` must reference an existing root category, keeping
    /// the hierarchy at exactly two levels.
    pub fn validate_category(&self, category: &Category) -> Result<(), CatalogError> {
        if category.name.trim().is_empty() {
            return Err(CatalogError::Validation("category name is required".into()));
        }
        if let Some(parent_id) = &category.parent_id {
            if parent_id == &category.id {
                return Err(CatalogError::Validation(
                    "category cannot be its own parent".into(),
                ));
            }
            let parent = self
                .category(parent_id)
                .ok_or_else(|| CatalogError::UnknownCategory(parent_id.to_string()))?;
            if !parent.is_root() {
                return Err(CatalogError::Validation(format!(
                    "parent {} is not a root category",
                    parent_id
                )));
            }
        }
        Ok(())
    }

    /// Validate a brand.
    pub fn validate_brand(&self, brand: &Brand) -> Result<(), CatalogError> {
        if brand.name.trim().is_empty() {
            return Err(CatalogError::Validation("brand name is required".into()));
        }
        Ok(())
    }

    /// Check that a category can be deleted: no product references it
    /// (as category or sub-category) and no child categories remain.
    pub fn ensure_category_deletable(&self, id: &CategoryId) -> Result<(), CatalogError> {
        if !self.children_of(id).is_empty() {
            return Err(CatalogError::CategoryHasChildren(id.to_string()));
        }
        let in_use = self.products.iter().any(|p| {
            &p.category_id == id || p.sub_category_id.as_ref() == Some(id)
        });
        if in_use {
            return Err(CatalogError::CategoryInUse(id.to_string()));
        }
        Ok(())
    }

    /// Check that a brand can be deleted: no product references it.
    pub fn ensure_brand_deletable(&self, id: &BrandId) -> Result<(), CatalogError> {
        if self.products.iter().any(|p| p.brand_ids.contains(id)) {
            return Err(CatalogError::BrandInUse(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let root = Category::new_root("Compressors");
        let other_root = Category::new_root("Controls");
        let child = Category::new_child(root.id.clone(), "Scroll");
        let brand = Brand::new("Danfoss");

        let mut product = Product::new("FRZ-001", "Scroll Compressor", root.id.clone());
        product.sub_category_id = Some(child.id.clone());
        product.brand_ids = vec![brand.id.clone()];

        Catalog {
            products: vec![product],
            categories: vec![root, other_root, child],
            brands: vec![brand],
        }
    }

    #[test]
    fn test_root_and_children() {
        let catalog = sample_catalog();
        assert_eq!(catalog.root_categories().len(), 2);

        let root_id = catalog.root_categories()[0].id.clone();
        let children = catalog.children_of(&root_id);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "Scroll");
    }

    #[test]
    fn test_brands_of_skips_dangling() {
        let catalog = sample_catalog();
        let mut product = catalog.products[0].clone();
        product.brand_ids.push(BrandId::new("gone"));

        let brands = catalog.brands_of(&product);
        assert_eq!(brands.len(), 1);
        assert_eq!(brands[0].name, "Danfoss");
    }

    #[test]
    fn test_validate_product_ok() {
        let catalog = sample_catalog();
        let mut product = catalog.products[0].clone();
        product.id = ProductId::generate();
        product.sku = "FRZ-002".into();
        assert!(catalog.validate_product(&product, &SkuPolicy::default()).is_ok());
    }

    #[test]
    fn test_sub_category_must_be_child_of_category() {
        let catalog = sample_catalog();
        let other_root = catalog.root_categories()[1].id.clone();

        let mut product = catalog.products[0].clone();
        product.id = ProductId::generate();
        product.sku = "FRZ-003".into();
        product.category_id = other_root;
        // sub_category_id still points at a child of the first root
        let err = catalog
            .validate_product(&product, &SkuPolicy::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::SubCategoryOutsideParent { .. }));
    }

    #[test]
    fn test_sku_conflict_is_case_insensitive_by_default() {
        let catalog = sample_catalog();
        let mut product = Product::new(" frz-001 ", "Duplicate", catalog.products[0].category_id.clone());
        product.brand_ids.clear();

        let err = catalog
            .validate_product(&product, &SkuPolicy::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::SkuConflict(_)));

        // An exact policy treats the different casing as distinct.
        assert!(catalog.validate_product(&product, &SkuPolicy::exact()).is_ok());
    }

    #[test]
    fn test_update_does_not_conflict_with_itself() {
        let catalog = sample_catalog();
        let mut product = catalog.products[0].clone();
        product.name = "Renamed".into();
        assert!(catalog.validate_product(&product, &SkuPolicy::default()).is_ok());
    }

    #[test]
    fn test_unknown_brand_rejected() {
        let catalog = sample_catalog();
        let mut product = catalog.products[0].clone();
        product.id = ProductId::generate();
        product.sku = "FRZ-004".into();
        product.brand_ids = vec![BrandId::new("missing")];

        let err = catalog
            .validate_product(&product, &SkuPolicy::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownBrand(_)));
    }

    #[test]
    fn test_category_parent_must_be_root() {
        let catalog = sample_catalog();
        let child_id = {
            let root_id = catalog.root_categories()[0].id.clone();
            catalog.children_of(&root_id)[0].id.clone()
        };

        let grandchild = Category::new_child(child_id, "Too deep");
        assert!(catalog.validate_category(&grandchild).is_err());
    }

    #[test]
    fn test_category_deletion_blocked_when_in_use() {
        let catalog = sample_catalog();
        let root_id = catalog.root_categories()[0].id.clone();

        let err = catalog.ensure_category_deletable(&root_id).unwrap_err();
        assert!(matches!(err, CatalogError::CategoryHasChildren(_)));

        let empty_root_id = catalog.root_categories()[1].id.clone();
        assert!(catalog.ensure_category_deletable(&empty_root_id).is_ok());
    }

    #[test]
    fn test_brand_deletion_blocked_when_in_use() {
        let catalog = sample_catalog();
        let brand_id = catalog.brands[0].id.clone();
        let err = catalog.ensure_brand_deletable(&brand_id).unwrap_err();
        assert!(matches!(err, CatalogError::BrandInUse(_)));
    }

    #[test]
    fn test_related_products_same_root() {
        let mut catalog = sample_catalog();
        let root_id = catalog.products[0].category_id.clone();
        let mut second = Product::new("FRZ-005", "Piston Compressor", root_id.clone());
        second.brand_ids.clear();
        catalog.products.push(second);

        let related = catalog.related_products(&catalog.products[0], 4);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].sku, "FRZ-005");
    }
}
