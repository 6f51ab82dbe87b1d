//! Storefront composition.
//!
//! Wires the catalog store, quote desk, shared basket, and auth boundary
//! together behind one handle, and owns the one orchestration with real
//! ordering requirements: quote submission. The basket lock is held from
//! snapshot through clear, so a racing basket mutation lands entirely
//! before or entirely after the submission.

use crate::backend::CatalogBackend;
use crate::basket::SharedBasket;
use crate::config::StoreConfig;
use crate::quotes::QuoteDesk;
use crate::store::CatalogStore;
use frostline_auth::{AdminGate, AuthError, AuthProvider, NewProfile, ProfilePatch, Session};
use frostline_cache::KeyValueStore;
use frostline_commerce::catalog::Product;
use frostline_commerce::error::CatalogError;
use frostline_commerce::filter::ProductFilter;
use frostline_commerce::quote::{ContactInfo, QuoteRequest};
use tracing::info;

/// The composed engine handle the UI talks to.
pub struct Storefront<B, K, A> {
    catalog: CatalogStore<B>,
    quotes: QuoteDesk<B>,
    basket: SharedBasket<K>,
    auth: A,
    gate: AdminGate,
    backend: B,
}

impl<B, K, A> Storefront<B, K, A>
where
    B: CatalogBackend + Clone,
    K: KeyValueStore,
    A: AuthProvider,
{
    /// Open a storefront over its collaborators. Restores the persisted
    /// basket; call [`Storefront::refresh`] to load the catalog and desk
    /// snapshots.
    pub fn open(backend: B, kv: K, auth: A, config: &StoreConfig) -> Result<Self, CatalogError> {
        let basket = SharedBasket::open(kv, config.basket_key.clone())?;
        Ok(Self {
            catalog: CatalogStore::new(
                backend.clone(),
                config.sku,
                config.default_site_logo.clone(),
            ),
            quotes: QuoteDesk::new(backend.clone()),
            basket,
            auth,
            gate: AdminGate::new(config.admin_username.clone(), config.admin_password.clone()),
            backend,
        })
    }

    /// Load every snapshot from the backend.
    pub async fn refresh(&self) -> Result<(), CatalogError> {
        self.catalog.refresh_all().await?;
        self.quotes.refresh_all().await
    }

    /// The catalog store.
    pub fn catalog(&self) -> &CatalogStore<B> {
        &self.catalog
    }

    /// The quote desk.
    pub fn quotes(&self) -> &QuoteDesk<B> {
        &self.quotes
    }

    /// The shared basket.
    pub fn basket(&self) -> &SharedBasket<K> {
        &self.basket
    }

    /// Products matching a filter, in catalog order.
    pub async fn browse(&self, filter: &ProductFilter) -> Vec<Product> {
        let catalog = self.catalog.catalog().await;
        filter.apply(&catalog.products).into_iter().cloned().collect()
    }

    /// Submit the current basket as a quote request.
    ///
    /// Reads a snapshot, persists the quote, and clears the basket only
    /// after persistence succeeds; a validation or backend failure leaves
    /// the basket exactly as it was. The basket lock is held throughout.
    pub async fn submit_quote(
        &self,
        session: &Session,
        contact: ContactInfo,
    ) -> Result<QuoteRequest, CatalogError> {
        let mut basket = self.basket.lock().await;
        let snapshot = basket.items.clone();

        let quote = self
            .quotes
            .submit_quote(contact, &snapshot, session.user_id().cloned())
            .await?;

        basket.clear();
        self.basket.persist(&basket)?;
        info!(id = %quote.id, "basket cleared after quote submission");
        Ok(quote)
    }

    /// Quotes belonging to the signed-in customer. Empty for anonymous
    /// and admin sessions.
    pub async fn my_quotes(&self, session: &Session) -> Vec<QuoteRequest> {
        match session.customer() {
            Some(customer) => self.quotes.quotes_for(customer).await,
            None => Vec::new(),
        }
    }

    // Account flows

    /// Sign a customer in.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let customer = self.auth.sign_in(email, password).await?;
        Ok(Session::Customer(customer))
    }

    /// Register a new customer account and store its profile row.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: NewProfile,
    ) -> Result<Session, AuthError> {
        let customer = self.auth.sign_up(email, password, profile).await?;
        self.backend
            .upsert_customer(customer.clone())
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        Ok(Session::Customer(customer))
    }

    /// Sign the current session out.
    pub async fn sign_out(&self) -> Result<Session, AuthError> {
        self.auth.sign_out().await?;
        Ok(Session::Anonymous)
    }

    /// Verify the shared back-office credential.
    pub fn admin_sign_in(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        self.gate.sign_in(username, password)
    }

    /// Apply a partial profile update to the signed-in customer and
    /// return the refreshed session.
    pub async fn update_profile(
        &self,
        session: &Session,
        patch: ProfilePatch,
    ) -> Result<Session, AuthError> {
        let customer = session.customer().ok_or(AuthError::Unauthorized)?;
        let updated = self.auth.update_profile(&customer.id, patch).await?;
        self.backend
            .upsert_customer(updated.clone())
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        Ok(Session::Customer(updated))
    }
}
