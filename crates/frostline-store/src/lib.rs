//! Catalog state and quote-workflow engine for Frostline.
//!
//! This crate holds everything with IO in it:
//!
//! - **Backend**: the narrow CRUD-and-fetch persistence contract, plus an
//!   in-memory reference implementation with failure injection
//! - **Row**: the documented lossy primary-brand projection between the
//!   domain model and the backend schema
//! - **Store**: the authoritative catalog snapshot with gated, validate-
//!   then-refetch mutations
//! - **Quotes**: the quote/inquiry desk with forward-only status machines
//! - **Basket**: serialized, persisted basket mutations
//! - **Assets**: the pending-blob-or-URL upload boundary
//! - **Storefront**: the composed handle the UI talks to
//!
//! # Example
//!
//! ```rust,ignore
//! use frostline_store::prelude::*;
//!
//! let config = StoreConfig::default();
//! let storefront = Storefront::open(backend, kv, auth, &config)?;
//! storefront.refresh().await?;
//!
//! storefront.basket().add(product_id, 2).await?;
//! let quote = storefront.submit_quote(&session, contact).await?;
//! ```

pub mod assets;
pub mod backend;
pub mod basket;
pub mod config;
pub mod memory;
pub mod quotes;
pub mod row;
pub mod store;
pub mod storefront;

pub use backend::{BackendError, CatalogBackend};
pub use basket::SharedBasket;
pub use config::{ConfigError, StoreConfig};
pub use memory::MemoryBackend;
pub use quotes::QuoteDesk;
pub use row::ProductRow;
pub use store::CatalogStore;
pub use storefront::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assets::{AssetSource, AssetStore, DataUri, MemoryAssets};
    pub use crate::backend::{BackendError, CatalogBackend};
    pub use crate::basket::SharedBasket;
    pub use crate::config::{ConfigError, StoreConfig};
    pub use crate::memory::MemoryBackend;
    pub use crate::quotes::QuoteDesk;
    pub use crate::row::ProductRow;
    pub use crate::store::CatalogStore;
    pub use crate::storefront::Storefront;
}
