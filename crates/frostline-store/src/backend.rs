//! Persistence backend contract.
//!
//! The engine talks to its remote database through this narrow CRUD-and-
//! fetch surface. Time-series collections (products, quotes, contact
//! messages) are fetched newest-first by contract. Every call may fail
//! independently; the service layer maps failures to
//! `CatalogError::Persistence` and leaves in-memory state untouched.

use crate::row::ProductRow;
use async_trait::async_trait;
use frostline_auth::Customer;
use frostline_commerce::catalog::{Brand, Category};
use frostline_commerce::ids::{BrandId, CategoryId, MessageId, ProductId, QuoteId, UserId};
use frostline_commerce::quote::{ContactMessage, QuoteRequest};
use thiserror::Error;

/// A backend read or write failure, carrying the backend's message.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// The remote persistence contract.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    // Products

    /// Fetch all product rows, newest first.
    async fn fetch_products(&self) -> Result<Vec<ProductRow>, BackendError>;
    async fn insert_product(&self, row: ProductRow) -> Result<(), BackendError>;
    async fn update_product(&self, row: ProductRow) -> Result<(), BackendError>;
    async fn delete_product(&self, id: &ProductId) -> Result<(), BackendError>;

    // Categories

    async fn fetch_categories(&self) -> Result<Vec<Category>, BackendError>;
    async fn insert_category(&self, category: Category) -> Result<(), BackendError>;
    async fn update_category(&self, category: Category) -> Result<(), BackendError>;
    async fn delete_category(&self, id: &CategoryId) -> Result<(), BackendError>;

    // Brands

    async fn fetch_brands(&self) -> Result<Vec<Brand>, BackendError>;
    async fn insert_brand(&self, brand: Brand) -> Result<(), BackendError>;
    async fn update_brand(&self, brand: Brand) -> Result<(), BackendError>;
    async fn delete_brand(&self, id: &BrandId) -> Result<(), BackendError>;

    // Quotes

    /// Fetch all quote requests, newest first.
    async fn fetch_quotes(&self) -> Result<Vec<QuoteRequest>, BackendError>;
    async fn insert_quote(&self, quote: QuoteRequest) -> Result<(), BackendError>;
    async fn update_quote(&self, quote: QuoteRequest) -> Result<(), BackendError>;

    // Contact messages

    /// Fetch all contact messages, newest first.
    async fn fetch_contact_messages(&self) -> Result<Vec<ContactMessage>, BackendError>;
    async fn insert_contact_message(&self, message: ContactMessage) -> Result<(), BackendError>;
    async fn update_contact_message(&self, message: ContactMessage) -> Result<(), BackendError>;

    // Site settings

    async fn fetch_setting(&self, key: &str) -> Result<Option<String>, BackendError>;
    async fn upsert_setting(&self, key: &str, value: &str) -> Result<(), BackendError>;

    // Customer profile rows

    async fn fetch_customer(&self, id: &UserId) -> Result<Option<Customer>, BackendError>;
    async fn upsert_customer(&self, customer: Customer) -> Result<(), BackendError>;

    // Message lookup helper used by the quote desk

    async fn fetch_quote(&self, id: &QuoteId) -> Result<Option<QuoteRequest>, BackendError> {
        Ok(self.fetch_quotes().await?.into_iter().find(|q| &q.id == id))
    }

    async fn fetch_contact_message(
        &self,
        id: &MessageId,
    ) -> Result<Option<ContactMessage>, BackendError> {
        Ok(self
            .fetch_contact_messages()
            .await?
            .into_iter()
            .find(|m| &m.id == id))
    }
}
