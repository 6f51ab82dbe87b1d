//! Quote and inquiry workflow.
//!
//! The desk owns the quote and contact-message snapshots over the same
//! backend as the catalog, with the same refetch-on-write discipline.
//! Status transitions are admin-only and forward-only; basket snapshot
//! and clearing are orchestrated one level up, by the storefront, so the
//! desk never touches the basket.

use crate::backend::CatalogBackend;
use frostline_auth::{Customer, Session};
use frostline_commerce::basket::BasketItem;
use frostline_commerce::error::CatalogError;
use frostline_commerce::ids::{MessageId, QuoteId, UserId};
use frostline_commerce::quote::{
    ContactForm, ContactInfo, ContactMessage, ContactStatus, QuoteRequest, QuoteStatus,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// The back-office desk for quotes and contact messages.
pub struct QuoteDesk<B> {
    backend: B,
    quotes: RwLock<Vec<QuoteRequest>>,
    messages: RwLock<Vec<ContactMessage>>,
}

fn authorize(session: &Session) -> Result<(), CatalogError> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(CatalogError::Unauthorized)
    }
}

impl<B: CatalogBackend> QuoteDesk<B> {
    /// Create a desk over a backend. Snapshots start empty; call
    /// [`QuoteDesk::refresh_all`] to load them.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            quotes: RwLock::new(Vec::new()),
            messages: RwLock::new(Vec::new()),
        }
    }

    /// Load both collections.
    pub async fn refresh_all(&self) -> Result<(), CatalogError> {
        self.refresh_quotes().await?;
        self.refresh_messages().await
    }

    /// Re-fetch the quote collection.
    pub async fn refresh_quotes(&self) -> Result<(), CatalogError> {
        let quotes = self
            .backend
            .fetch_quotes()
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        debug!(count = quotes.len(), "quotes refreshed");
        *self.quotes.write().await = quotes;
        Ok(())
    }

    /// Re-fetch the contact-message collection.
    pub async fn refresh_messages(&self) -> Result<(), CatalogError> {
        let messages = self
            .backend
            .fetch_contact_messages()
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        debug!(count = messages.len(), "contact messages refreshed");
        *self.messages.write().await = messages;
        Ok(())
    }

    /// A point-in-time copy of all quotes, newest first.
    pub async fn quotes(&self) -> Vec<QuoteRequest> {
        self.quotes.read().await.clone()
    }

    /// A point-in-time copy of all contact messages, newest first.
    pub async fn messages(&self) -> Vec<ContactMessage> {
        self.messages.read().await.clone()
    }

    /// Quotes belonging to a customer account: matched by user id or by
    /// submission email. The account "my quotes" view.
    pub async fn quotes_for(&self, customer: &Customer) -> Vec<QuoteRequest> {
        self.quotes
            .read()
            .await
            .iter()
            .filter(|q| q.belongs_to(&customer.id, &customer.email))
            .cloned()
            .collect()
    }

    /// Persist a new quote from validated-on-entry contact details and a
    /// basket snapshot. Validation happens before any side effect; the
    /// caller's basket is untouched either way.
    pub async fn submit_quote(
        &self,
        contact: ContactInfo,
        items: &[BasketItem],
        user_id: Option<UserId>,
    ) -> Result<QuoteRequest, CatalogError> {
        contact.validate()?;
        if items.is_empty() {
            return Err(CatalogError::Validation(
                "cannot request a quote for an empty basket".into(),
            ));
        }

        let quote = QuoteRequest::new(contact, items.to_vec(), user_id);
        self.backend
            .insert_quote(quote.clone())
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %quote.id, lines = quote.items.len(), "quote submitted");
        self.refresh_quotes().await?;
        Ok(quote)
    }

    /// Persist a contact-page inquiry.
    pub async fn submit_contact_message(
        &self,
        form: ContactForm,
    ) -> Result<ContactMessage, CatalogError> {
        form.validate()?;

        let message = ContactMessage::new(form);
        self.backend
            .insert_contact_message(message.clone())
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %message.id, "contact message submitted");
        self.refresh_messages().await?;
        Ok(message)
    }

    /// Advance a quote's status. Admin only; forward-only, skips allowed.
    /// Setting the current status again is a no-op success.
    pub async fn update_quote_status(
        &self,
        session: &Session,
        id: &QuoteId,
        status: QuoteStatus,
    ) -> Result<(), CatalogError> {
        authorize(session)?;

        let mut quote = {
            let quotes = self.quotes.read().await;
            quotes
                .iter()
                .find(|q| &q.id == id)
                .cloned()
                .ok_or_else(|| CatalogError::QuoteNotFound(id.to_string()))?
        };

        if quote.status == status {
            return Ok(());
        }
        if !quote.status.can_advance_to(status) {
            warn!(id = %id, from = quote.status.as_str(), to = status.as_str(),
                "backward quote transition rejected");
            return Err(CatalogError::Validation(format!(
                "cannot move quote from {} back to {}",
                quote.status.as_str(),
                status.as_str()
            )));
        }

        quote.status = status;
        self.backend
            .update_quote(quote)
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %id, status = status.as_str(), "quote status updated");
        self.refresh_quotes().await
    }

    /// Mark a contact message read. Admin only; marking a read message
    /// again is a no-op success.
    pub async fn mark_contact_read(
        &self,
        session: &Session,
        id: &MessageId,
    ) -> Result<(), CatalogError> {
        authorize(session)?;

        let mut message = {
            let messages = self.messages.read().await;
            messages
                .iter()
                .find(|m| &m.id == id)
                .cloned()
                .ok_or_else(|| CatalogError::MessageNotFound(id.to_string()))?
        };

        if message.status == ContactStatus::Read {
            return Ok(());
        }

        message.status = ContactStatus::Read;
        self.backend
            .update_contact_message(message)
            .await
            .map_err(|e| CatalogError::Persistence(e.to_string()))?;
        info!(id = %id, "contact message marked read");
        self.refresh_messages().await
    }
}
