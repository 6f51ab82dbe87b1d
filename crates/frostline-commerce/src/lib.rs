//! Catalog, basket, and quote domain logic for Frostline.
//!
//! This crate is the pure core of the storefront engine:
//!
//! - **Catalog**: products, a two-level category taxonomy, brands, and the
//!   validators that keep references between them sound
//! - **Specs**: the backward-compatible codec for product technical data
//! - **Basket**: quantity-merging line items with explicit resolution of
//!   dangling product ids
//! - **Filter**: the conjunctive browse filter with sub-category reset
//! - **Quote**: request-for-quote and inquiry types with forward-only
//!   status machines
//!
//! Everything here is synchronous values and functions; IO lives in
//! `frostline-store`.
//!
//! # Example
//!
//! ```rust,ignore
//! use frostline_commerce::prelude::*;
//!
//! let mut basket = Basket::new();
//! basket.add(product.id.clone(), 2);
//! basket.add(product.id.clone(), 3); // merged: one line, quantity 5
//!
//! let sheet = SpecSheet::decode(&product.specifications);
//! for row in &sheet.table {
//!     println!("{}: {}", row.key, row.value);
//! }
//! ```

pub mod basket;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod ids;
pub mod quote;
pub mod sku;
pub mod specs;

pub use error::CatalogError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        Brand, BrandCatalogue, Catalog, Category, Product, ProductStatus,
    };

    // Specs
    pub use crate::specs::{SpecRow, SpecShape, SpecSheet};

    // Basket
    pub use crate::basket::{Basket, BasketItem, ResolvedLine};

    // Filter
    pub use crate::filter::{ProductFilter, Selection};

    // Quote
    pub use crate::quote::{
        ContactForm, ContactInfo, ContactMessage, ContactStatus, QuoteRequest, QuoteStatus,
    };

    // Policy
    pub use crate::sku::SkuPolicy;
}
