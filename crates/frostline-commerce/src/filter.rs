//! Filter engine for the browse views.
//!
//! Matching is conjunctive across dimensions and disjunctive within the
//! brand and search dimensions. The engine owns the one correctness
//! invariant callers kept getting wrong: switching the root category
//! resets the sub-category selection, since a sub-category id from a
//! different parent is never valid.

use crate::catalog::Product;
use crate::ids::{BrandId, CategoryId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A category dimension selection: everything, or one specific category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// No restriction on this dimension.
    #[default]
    All,
    /// Restrict to a single category.
    Only(CategoryId),
}

impl Selection {
    /// Check a product's category id against this selection.
    fn matches(&self, id: Option<&CategoryId>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => id == Some(wanted),
        }
    }
}

/// The current filter state for a product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Root category selection.
    pub category: Selection,
    /// Sub-category selection; only meaningful under a selected root.
    pub sub_category: Selection,
    /// Selected brands; empty means no brand restriction.
    pub brand_ids: BTreeSet<BrandId>,
    /// Free-text search, matched case-insensitively against name or SKU.
    pub search: String,
    /// Whether draft products are included (admin views only).
    pub include_drafts: bool,
}

impl ProductFilter {
    /// Filter for the public storefront: drafts hidden.
    pub fn storefront() -> Self {
        Self::default()
    }

    /// Filter for the back office: drafts visible.
    pub fn admin() -> Self {
        Self {
            include_drafts: true,
            ..Self::default()
        }
    }

    /// Change the root category selection. Any sub-category selection is
    /// reset whenever the root changes — a sub-category from a different
    /// parent is never a valid selection.
    pub fn select_category(&mut self, category: Selection) {
        if self.category != category {
            self.sub_category = Selection::All;
        }
        self.category = category;
    }

    /// Change the sub-category selection.
    pub fn select_sub_category(&mut self, sub_category: Selection) {
        self.sub_category = sub_category;
    }

    /// Toggle a brand in or out of the brand set.
    pub fn toggle_brand(&mut self, brand_id: BrandId) {
        if !self.brand_ids.remove(&brand_id) {
            self.brand_ids.insert(brand_id);
        }
    }

    /// Replace the free-text search.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Check a single product against every dimension.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.include_drafts && !product.is_visible() {
            return false;
        }
        if !self.category.matches(Some(&product.category_id)) {
            return false;
        }
        if !self.sub_category.matches(product.sub_category_id.as_ref()) {
            return false;
        }
        if !self.brand_ids.is_empty()
            && !product.brand_ids.iter().any(|b| self.brand_ids.contains(b))
        {
            return false;
        }
        let search = self.search.trim().to_lowercase();
        if !search.is_empty() {
            let name = product.name.to_lowercase();
            let sku = product.sku.to_lowercase();
            if !name.contains(&search) && !sku.contains(&search) {
                return false;
            }
        }
        true
    }

    /// Apply the filter to a product list, preserving its order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductStatus;

    fn product(sku: &str, name: &str, cat: &str, sub: Option<&str>, brands: &[&str]) -> Product {
        let mut p = Product::new(sku, name, CategoryId::new(cat));
        p.sub_category_id = sub.map(CategoryId::new);
        p.brand_ids = brands.iter().map(|b| BrandId::new(*b)).collect();
        p
    }

    fn sample_products() -> Vec<Product> {
        vec![
            product("FRZ-1", "Scroll Compressor", "c1", Some("c1a"), &["b1"]),
            product("FRZ-2", "Piston Compressor", "c1", Some("c1b"), &["b2"]),
            product("FRZ-3", "Thermostat", "c2", None, &["b1", "b3"]),
            product("FRZ-4", "Fan Blade", "c2", None, &[]),
            product("FRZ-5", "Door Gasket", "c1", None, &["b3"]),
            product("FRZ-6", "Evaporator Coil", "c1", Some("c1a"), &["b2"]),
        ]
    }

    #[test]
    fn test_category_filter_preserves_order() {
        let products = sample_products();
        let mut filter = ProductFilter::storefront();
        filter.select_category(Selection::Only(CategoryId::new("c1")));

        let matched = filter.apply(&products);
        let skus: Vec<&str> = matched.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["FRZ-1", "FRZ-2", "FRZ-5", "FRZ-6"]);
    }

    #[test]
    fn test_sub_category_filter() {
        let products = sample_products();
        let mut filter = ProductFilter::storefront();
        filter.select_category(Selection::Only(CategoryId::new("c1")));
        filter.select_sub_category(Selection::Only(CategoryId::new("c1a")));

        let matched = filter.apply(&products);
        let skus: Vec<&str> = matched.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["FRZ-1", "FRZ-6"]);
    }

    #[test]
    fn test_switching_category_resets_sub_category() {
        let mut filter = ProductFilter::storefront();
        filter.select_category(Selection::Only(CategoryId::new("c1")));
        filter.select_sub_category(Selection::Only(CategoryId::new("c1a")));

        filter.select_category(Selection::Only(CategoryId::new("c2")));
        assert_eq!(filter.sub_category, Selection::All);

        // Re-selecting the same category keeps the sub-category.
        filter.select_sub_category(Selection::Only(CategoryId::new("c2a")));
        filter.select_category(Selection::Only(CategoryId::new("c2")));
        assert_eq!(filter.sub_category, Selection::Only(CategoryId::new("c2a")));
    }

    #[test]
    fn test_brand_filter_is_disjunctive_within() {
        let products = sample_products();
        let mut filter = ProductFilter::storefront();
        filter.toggle_brand(BrandId::new("b1"));
        filter.toggle_brand(BrandId::new("b2"));

        let matched = filter.apply(&products);
        let skus: Vec<&str> = matched.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["FRZ-1", "FRZ-2", "FRZ-3", "FRZ-6"]);
    }

    #[test]
    fn test_toggle_brand_removes_on_second_call() {
        let mut filter = ProductFilter::storefront();
        filter.toggle_brand(BrandId::new("b1"));
        filter.toggle_brand(BrandId::new("b1"));
        assert!(filter.brand_ids.is_empty());
    }

    #[test]
    fn test_search_matches_name_or_sku() {
        let products = sample_products();
        let mut filter = ProductFilter::storefront();
        filter.set_search("compressor");
        assert_eq!(filter.apply(&products).len(), 2);

        filter.set_search("frz-4");
        let matched = filter.apply(&products);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Fan Blade");
    }

    #[test]
    fn test_dimensions_are_conjunctive() {
        let products = sample_products();
        let mut filter = ProductFilter::storefront();
        filter.select_category(Selection::Only(CategoryId::new("c1")));
        filter.toggle_brand(BrandId::new("b2"));
        filter.set_search("compressor");

        let matched = filter.apply(&products);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].sku, "FRZ-2");
    }

    #[test]
    fn test_drafts_hidden_from_storefront() {
        let mut products = sample_products();
        products[0].status = ProductStatus::Draft;

        let storefront = ProductFilter::storefront();
        assert_eq!(storefront.apply(&products).len(), 5);

        let admin = ProductFilter::admin();
        assert_eq!(admin.apply(&products).len(), 6);
    }
}
