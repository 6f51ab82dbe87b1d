//! Basket aggregation.
//!
//! The basket is a pure value keyed by product id: one line per distinct
//! product, quantity always at least 1. It deliberately does not validate
//! that product ids resolve against the live catalog; a line whose product
//! has since been deleted is a first-class, renderable outcome, resolved
//! explicitly via [`Basket::resolve`].

use crate::catalog::{Catalog, Product};
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// One line in a basket or in a quote snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BasketItem {
    /// The product this line refers to. May no longer resolve.
    pub product_id: ProductId,
    /// Quantity requested, always >= 1.
    pub quantity: u32,
}

impl BasketItem {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity: quantity.max(1),
        }
    }
}

/// The request-for-quote basket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Basket {
    /// Lines in insertion order.
    pub items: Vec<BasketItem>,
}

impl Basket {
    /// Create an empty basket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quantity of a product. Merges into an existing line
    /// (saturating) or appends a new one. Zero quantities are treated as 1.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(BasketItem::new(product_id, quantity));
        }
    }

    /// Set the quantity of an existing line, clamped to a minimum of 1.
    /// A zero never removes the line; use [`Basket::remove`] for that.
    /// Unknown product ids are a no-op.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if let Some(existing) = self.items.iter_mut().find(|i| &i.product_id == product_id) {
            existing.quantity = quantity.max(1);
        }
    }

    /// Remove a line. Returns true if a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|i| i.quantity as u64).sum()
    }

    /// Check if the basket has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by product id.
    pub fn get(&self, product_id: &ProductId) -> Option<&BasketItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Resolve every line against a catalog snapshot. Lines whose product
    /// id no longer resolves come back as [`ResolvedLine::Unresolved`];
    /// renderers omit or placeholder them, they are never an error.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<ResolvedLine<'a>> {
        self.items
            .iter()
            .map(|item| resolve_item(item, catalog))
            .collect()
    }
}

/// Resolve a single basket or quote line against a catalog snapshot.
pub fn resolve_item<'a>(item: &BasketItem, catalog: &'a Catalog) -> ResolvedLine<'a> {
    match catalog.product(&item.product_id) {
        Some(product) => ResolvedLine::Resolved {
            product,
            quantity: item.quantity,
        },
        None => ResolvedLine::Unresolved {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
        },
    }
}

/// The outcome of resolving a line against the live catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedLine<'a> {
    /// The product still exists.
    Resolved { product: &'a Product, quantity: u32 },
    /// The product was deleted after the line was captured.
    Unresolved { product_id: ProductId, quantity: u32 },
}

impl ResolvedLine<'_> {
    /// The quantity on the line regardless of resolution.
    pub fn quantity(&self) -> u32 {
        match self {
            ResolvedLine::Resolved { quantity, .. } => *quantity,
            ResolvedLine::Unresolved { quantity, .. } => *quantity,
        }
    }

    /// The product id on the line regardless of resolution.
    pub fn product_id(&self) -> &ProductId {
        match self {
            ResolvedLine::Resolved { product, .. } => &product.id,
            ResolvedLine::Unresolved { product_id, .. } => product_id,
        }
    }

    /// True when the line's product no longer exists.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolvedLine::Unresolved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    #[test]
    fn test_add_merges_quantities() {
        let mut basket = Basket::new();
        basket.add(ProductId::new("p1"), 2);
        basket.add(ProductId::new("p1"), 3);

        assert_eq!(basket.len(), 1);
        assert_eq!(basket.get(&ProductId::new("p1")).unwrap().quantity, 5);
    }

    #[test]
    fn test_add_zero_counts_as_one() {
        let mut basket = Basket::new();
        basket.add(ProductId::new("p1"), 0);
        assert_eq!(basket.get(&ProductId::new("p1")).unwrap().quantity, 1);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut basket = Basket::new();
        basket.add(ProductId::new("p1"), 4);
        basket.set_quantity(&ProductId::new("p1"), 0);

        assert_eq!(basket.get(&ProductId::new("p1")).unwrap().quantity, 1);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut basket = Basket::new();
        basket.set_quantity(&ProductId::new("ghost"), 5);
        assert!(basket.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut basket = Basket::new();
        basket.add(ProductId::new("p1"), 1);
        basket.add(ProductId::new("p2"), 2);

        assert!(basket.remove(&ProductId::new("p1")));
        assert!(!basket.remove(&ProductId::new("p1")));
        assert_eq!(basket.len(), 1);

        basket.clear();
        assert!(basket.is_empty());
    }

    #[test]
    fn test_total_units() {
        let mut basket = Basket::new();
        basket.add(ProductId::new("p1"), 2);
        basket.add(ProductId::new("p2"), 3);
        assert_eq!(basket.total_units(), 5);
    }

    #[test]
    fn test_resolve_marks_dangling_ids() {
        let root = Category::new_root("Compressors");
        let product = Product::new("FRZ-001", "Compressor", root.id.clone());
        let product_id = product.id.clone();
        let catalog = Catalog {
            products: vec![product],
            categories: vec![root],
            brands: vec![],
        };

        let mut basket = Basket::new();
        basket.add(product_id.clone(), 1);
        basket.add(ProductId::new("deleted"), 2);

        let resolved = basket.resolve(&catalog);
        assert_eq!(resolved.len(), 2);
        assert!(!resolved[0].is_unresolved());
        assert!(resolved[1].is_unresolved());
        assert_eq!(resolved[1].quantity(), 2);
        assert_eq!(resolved[1].product_id().as_str(), "deleted");
    }
}
