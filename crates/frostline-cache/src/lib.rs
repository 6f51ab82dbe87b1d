//! Scoped key-value persistence for Frostline.
//!
//! Provides the [`KeyValueStore`] contract with automatic JSON
//! serialization, an in-memory implementation, and the persisted-basket
//! wrapper used by the storefront.

pub mod basket;
pub mod error;
pub mod kv;

pub use basket::BasketStore;
pub use error::CacheError;
pub use kv::{KeyValueStore, MemoryStore};
