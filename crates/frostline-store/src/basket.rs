//! Serialized, persisted basket mutations.
//!
//! Every mutation goes through one async mutex, so a quote submission can
//! hold the lock from snapshot through clear and a racing `add` lands
//! deterministically before or after the whole submission, never inside
//! it. The basket is written to the scoped key-value store after every
//! change and restored verbatim (stale product ids included) on startup.

use frostline_cache::{BasketStore, KeyValueStore};
use frostline_commerce::basket::{Basket, BasketItem};
use frostline_commerce::error::CatalogError;
use frostline_commerce::ids::ProductId;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// The live basket plus its persistence.
pub struct SharedBasket<K> {
    store: BasketStore<K>,
    inner: Mutex<Basket>,
}

impl<K: KeyValueStore> SharedBasket<K> {
    /// Open the basket, restoring any persisted contents verbatim.
    pub fn open(kv: K, key: impl Into<String>) -> Result<Self, CatalogError> {
        let store = BasketStore::new(kv, key);
        let basket = store
            .load()
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        debug!(lines = basket.len(), "basket restored");
        Ok(Self {
            store,
            inner: Mutex::new(basket),
        })
    }

    /// Add a quantity of a product, merging into any existing line.
    pub async fn add(&self, product_id: ProductId, quantity: u32) -> Result<(), CatalogError> {
        let mut basket = self.inner.lock().await;
        basket.add(product_id, quantity);
        self.persist(&basket)
    }

    /// Set a line's quantity, clamped to a minimum of 1.
    pub async fn set_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), CatalogError> {
        let mut basket = self.inner.lock().await;
        basket.set_quantity(product_id, quantity);
        self.persist(&basket)
    }

    /// Remove a line.
    pub async fn remove(&self, product_id: &ProductId) -> Result<(), CatalogError> {
        let mut basket = self.inner.lock().await;
        basket.remove(product_id);
        self.persist(&basket)
    }

    /// Remove all lines.
    pub async fn clear(&self) -> Result<(), CatalogError> {
        let mut basket = self.inner.lock().await;
        basket.clear();
        self.persist(&basket)
    }

    /// A point-in-time copy of the basket contents.
    pub async fn snapshot(&self) -> Vec<BasketItem> {
        self.inner.lock().await.items.clone()
    }

    /// Sum of quantities across lines.
    pub async fn total_units(&self) -> u64 {
        self.inner.lock().await.total_units()
    }

    /// Hold the basket lock across a multi-step operation. Used by the
    /// quote submission to keep snapshot, persist, and clear atomic with
    /// respect to other mutations.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, Basket> {
        self.inner.lock().await
    }

    /// Write the current contents through to the scoped store.
    pub(crate) fn persist(&self, basket: &Basket) -> Result<(), CatalogError> {
        self.store
            .save(basket)
            .map_err(|e| CatalogError::Persistence(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frostline_cache::MemoryStore;

    #[tokio::test]
    async fn test_mutations_persist() {
        let kv = MemoryStore::new();
        let basket = SharedBasket::open(kv.clone(), "basket").unwrap();
        basket.add(ProductId::new("p1"), 2).await.unwrap();
        basket.add(ProductId::new("p1"), 3).await.unwrap();

        // A fresh handle over the same store sees the merged line.
        let reopened = SharedBasket::open(kv, "basket").unwrap();
        let items = reopened.snapshot().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_set_quantity_clamps() {
        let basket = SharedBasket::open(MemoryStore::new(), "basket").unwrap();
        basket.add(ProductId::new("p1"), 4).await.unwrap();
        basket.set_quantity(&ProductId::new("p1"), 0).await.unwrap();

        assert_eq!(basket.snapshot().await[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_stale_ids_restore_verbatim() {
        let kv = MemoryStore::new();
        {
            let basket = SharedBasket::open(kv.clone(), "basket").unwrap();
            basket.add(ProductId::new("deleted-product"), 7).await.unwrap();
        }
        let restored = SharedBasket::open(kv, "basket").unwrap();
        let items = restored.snapshot().await;
        assert_eq!(items[0].product_id.as_str(), "deleted-product");
        assert_eq!(items[0].quantity, 7);
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let basket = SharedBasket::open(MemoryStore::new(), "basket").unwrap();
        basket.add(ProductId::new("p1"), 1).await.unwrap();
        basket.add(ProductId::new("p2"), 2).await.unwrap();

        basket.remove(&ProductId::new("p1")).await.unwrap();
        assert_eq!(basket.snapshot().await.len(), 1);

        basket.clear().await.unwrap();
        assert!(basket.snapshot().await.is_empty());
    }
}
