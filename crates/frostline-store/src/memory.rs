//! In-memory reference backend.
//!
//! Implements [`CatalogBackend`] over plain vectors, with the same
//! newest-first fetch ordering the remote backend guarantees for
//! time-series collections, plus one-shot failure injection for
//! error-path tests. Clones share state.

use crate::backend::{BackendError, CatalogBackend};
use crate::row::ProductRow;
use async_trait::async_trait;
use frostline_auth::Customer;
use frostline_commerce::catalog::{Brand, Category};
use frostline_commerce::ids::{BrandId, CategoryId, ProductId, UserId};
use frostline_commerce::quote::{ContactMessage, QuoteRequest};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct Inner {
    products: Vec<ProductRow>,
    categories: Vec<Category>,
    brands: Vec<Brand>,
    quotes: Vec<QuoteRequest>,
    messages: Vec<ContactMessage>,
    settings: BTreeMap<String, String>,
    customers: BTreeMap<String, Customer>,
    fail_next: Option<String>,
}

/// Shared in-memory backend for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next backend call fail with this message.
    pub fn fail_next(&self, message: impl Into<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_next = Some(message.into());
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, BackendError> {
        self.inner
            .lock()
            .map_err(|_| BackendError::new("backend mutex poisoned"))
    }

    /// Lock and consume any pending injected failure.
    fn guard(&self) -> Result<std::sync::MutexGuard<'_, Inner>, BackendError> {
        let mut inner = self.lock()?;
        if let Some(message) = inner.fail_next.take() {
            return Err(BackendError(message));
        }
        Ok(inner)
    }
}

/// Clone a time-series collection in newest-first order.
fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> i64) -> Vec<T> {
    let mut out: Vec<T> = rows.to_vec();
    // Insertion order is newest-last; reverse first so equal timestamps
    // keep newest-first under the stable sort.
    out.reverse();
    out.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    out
}

#[async_trait]
impl CatalogBackend for MemoryBackend {
    async fn fetch_products(&self) -> Result<Vec<ProductRow>, BackendError> {
        let inner = self.guard()?;
        Ok(newest_first(&inner.products, |r| r.created_at))
    }

    async fn insert_product(&self, row: ProductRow) -> Result<(), BackendError> {
        self.guard()?.products.push(row);
        Ok(())
    }

    async fn update_product(&self, row: ProductRow) -> Result<(), BackendError> {
        let mut inner = self.guard()?;
        match inner.products.iter_mut().find(|r| r.id == row.id) {
            Some(existing) => {
                *existing = row;
                Ok(())
            }
            None => Err(BackendError::new(format!("no product row {}", row.id))),
        }
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), BackendError> {
        self.guard()?.products.retain(|r| &r.id != id);
        Ok(())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, BackendError> {
        Ok(self.guard()?.categories.clone())
    }

    async fn insert_category(&self, category: Category) -> Result<(), BackendError> {
        self.guard()?.categories.push(category);
        Ok(())
    }

    async fn update_category(&self, category: Category) -> Result<(), BackendError> {
        let mut inner = self.guard()?;
        match inner.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => {
                *existing = category;
                Ok(())
            }
            None => Err(BackendError::new(format!("no category row {}", category.id))),
        }
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), BackendError> {
        self.guard()?.categories.retain(|c| &c.id != id);
        Ok(())
    }

    async fn fetch_brands(&self) -> Result<Vec<Brand>, BackendError> {
        Ok(self.guard()?.brands.clone())
    }

    async fn insert_brand(&self, brand: Brand) -> Result<(), BackendError> {
        self.guard()?.brands.push(brand);
        Ok(())
    }

    async fn update_brand(&self, brand: Brand) -> Result<(), BackendError> {
        let mut inner = self.guard()?;
        match inner.brands.iter_mut().find(|b| b.id == brand.id) {
            Some(existing) => {
                *existing = brand;
                Ok(())
            }
            None => Err(BackendError::new(format!("no brand row {}", brand.id))),
        }
    }

    async fn delete_brand(&self, id: &BrandId) -> Result<(), BackendError> {
        self.guard()?.brands.retain(|b| &b.id != id);
        Ok(())
    }

    async fn fetch_quotes(&self) -> Result<Vec<QuoteRequest>, BackendError> {
        let inner = self.guard()?;
        Ok(newest_first(&inner.quotes, |q| q.created_at))
    }

    async fn insert_quote(&self, quote: QuoteRequest) -> Result<(), BackendError> {
        self.guard()?.quotes.push(quote);
        Ok(())
    }

    async fn update_quote(&self, quote: QuoteRequest) -> Result<(), BackendError> {
        let mut inner = self.guard()?;
        match inner.quotes.iter_mut().find(|q| q.id == quote.id) {
            Some(existing) => {
                *existing = quote;
                Ok(())
            }
            None => Err(BackendError::new(format!("no quote row {}", quote.id))),
        }
    }

    async fn fetch_contact_messages(&self) -> Result<Vec<ContactMessage>, BackendError> {
        let inner = self.guard()?;
        Ok(newest_first(&inner.messages, |m| m.created_at))
    }

    async fn insert_contact_message(&self, message: ContactMessage) -> Result<(), BackendError> {
        self.guard()?.messages.push(message);
        Ok(())
    }

    async fn update_contact_message(&self, message: ContactMessage) -> Result<(), BackendError> {
        let mut inner = self.guard()?;
        match inner.messages.iter_mut().find(|m| m.id == message.id) {
            Some(existing) => {
                *existing = message;
                Ok(())
            }
            None => Err(BackendError::new(format!("no message row {}", message.id))),
        }
    }

    async fn fetch_setting(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.guard()?.settings.get(key).cloned())
    }

    async fn upsert_setting(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.guard()?
            .settings
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn fetch_customer(&self, id: &UserId) -> Result<Option<Customer>, BackendError> {
        Ok(self.guard()?.customers.get(id.as_str()).cloned())
    }

    async fn upsert_customer(&self, customer: Customer) -> Result<(), BackendError> {
        self.guard()?
            .customers
            .insert(customer.id.as_str().to_string(), customer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sku: &str, created_at: i64) -> ProductRow {
        let mut product =
            frostline_commerce::catalog::Product::new(sku, sku, CategoryId::new("c1"));
        product.created_at = created_at;
        ProductRow::from_product(&product)
    }

    #[tokio::test]
    async fn test_products_fetch_newest_first() {
        let backend = MemoryBackend::new();
        backend.insert_product(row("A", 10)).await.unwrap();
        backend.insert_product(row("B", 30)).await.unwrap();
        backend.insert_product(row("C", 20)).await.unwrap();

        let skus: Vec<String> = backend
            .fetch_products()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.sku)
            .collect();
        assert_eq!(skus, vec!["B", "C", "A"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_keep_insertion_newest_first() {
        let backend = MemoryBackend::new();
        backend.insert_product(row("A", 10)).await.unwrap();
        backend.insert_product(row("B", 10)).await.unwrap();

        let skus: Vec<String> = backend
            .fetch_products()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.sku)
            .collect();
        assert_eq!(skus, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_fail_next_fails_exactly_once() {
        let backend = MemoryBackend::new();
        backend.fail_next("injected outage");

        let err = backend.fetch_products().await.unwrap_err();
        assert_eq!(err.to_string(), "injected outage");

        // Recovered on the next call.
        assert!(backend.fetch_products().await.is_ok());
    }

    #[tokio::test]
    async fn test_update_missing_row_errors() {
        let backend = MemoryBackend::new();
        let err = backend.update_product(row("X", 1)).await.unwrap_err();
        assert!(err.to_string().contains("no product row"));
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let backend = MemoryBackend::new();
        assert!(backend.fetch_setting("site_logo").await.unwrap().is_none());

        backend.upsert_setting("site_logo", "/logo.png").await.unwrap();
        assert_eq!(
            backend.fetch_setting("site_logo").await.unwrap().as_deref(),
            Some("/logo.png")
        );
    }
}
