//! Persisted basket storage.
//!
//! The basket lives under a fixed key independent of any user session, so
//! whichever browser profile holds the store shares the basket. It is
//! restored verbatim on load, stale product ids included; resolution
//! against the live catalog happens at render time.

use crate::kv::KeyValueStore;
use crate::CacheError;
use frostline_commerce::basket::Basket;

/// Reads and writes a [`Basket`] under a configured key.
#[derive(Debug, Clone)]
pub struct BasketStore<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> BasketStore<K> {
    /// Create a basket store over a key-value backend.
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// The key the basket is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored basket. A missing key yields an empty basket.
    pub fn load(&self) -> Result<Basket, CacheError> {
        Ok(self.kv.get(&self.key)?.unwrap_or_default())
    }

    /// Persist the basket, replacing any stored value.
    pub fn save(&self, basket: &Basket) -> Result<(), CacheError> {
        self.kv.set(&self.key, basket)
    }

    /// Remove the stored basket entirely.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.kv.delete(&self.key)
    }
}
