//! Quote requests and contact messages.
//!
//! A quote request is the site's substitute for checkout: a snapshot of
//! the basket plus contact details, answered manually by the back office.
//! Both lifecycles are forward-only state machines.

use crate::basket::BasketItem;
use crate::error::CatalogError;
use crate::ids::{MessageId, QuoteId, UserId};
use serde::{Deserialize, Serialize};

/// Lifecycle of a quote request. Transitions are admin-triggered, may
/// skip forward, and never move backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QuoteStatus {
    /// Submitted, not yet looked at.
    #[default]
    New,
    /// Opened by an admin.
    Viewed,
    /// A price response has been sent.
    Replied,
    /// The request is closed.
    Completed,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::New => "new",
            QuoteStatus::Viewed => "viewed",
            QuoteStatus::Replied => "replied",
            QuoteStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new" => Some(QuoteStatus::New),
            "viewed" => Some(QuoteStatus::Viewed),
            "replied" => Some(QuoteStatus::Replied),
            "completed" => Some(QuoteStatus::Completed),
            _ => None,
        }
    }

    /// Position in the forward-only ordering.
    fn rank(&self) -> u8 {
        match self {
            QuoteStatus::New => 0,
            QuoteStatus::Viewed => 1,
            QuoteStatus::Replied => 2,
            QuoteStatus::Completed => 3,
        }
    }

    /// Whether a transition to `next` is allowed. Staying in place is
    /// allowed (a no-op); moving backward is not.
    pub fn can_advance_to(&self, next: QuoteStatus) -> bool {
        next.rank() >= self.rank()
    }
}

/// Lifecycle of a contact message: one-way, terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ContactStatus {
    /// Received, not yet opened.
    #[default]
    New,
    /// Opened by an admin.
    Read,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
        }
    }
}

/// Contact details attached to a quote submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: String,
    /// Customer phone number.
    pub phone: String,
    /// Free-text message accompanying the request.
    pub message: String,
}

impl ContactInfo {
    /// Validate required fields. Called before any side effect.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::Validation("customer name is required".into()));
        }
        if self.email.trim().is_empty() {
            return Err(CatalogError::Validation("customer email is required".into()));
        }
        if self.phone.trim().is_empty() {
            return Err(CatalogError::Validation("customer phone is required".into()));
        }
        Ok(())
    }
}

/// A persisted request for quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteRequest {
    /// Unique quote identifier.
    pub id: QuoteId,
    /// Signed-in customer id, if any.
    pub user_id: Option<UserId>,
    /// Customer name as entered at submission.
    pub customer_name: String,
    /// Customer email as entered at submission.
    pub customer_email: String,
    /// Customer phone as entered at submission.
    pub customer_phone: String,
    /// Free-text message.
    pub message: String,
    /// Snapshot of the basket at submission time. Product ids may stop
    /// resolving later; that is expected, not an error.
    pub items: Vec<BasketItem>,
    /// Unix timestamp of submission.
    pub created_at: i64,
    /// Current lifecycle status.
    pub status: QuoteStatus,
}

impl QuoteRequest {
    /// Build a new quote from validated contact details and a basket
    /// snapshot. Validation is the caller's responsibility so that it can
    /// happen before any side effect.
    pub fn new(contact: ContactInfo, items: Vec<BasketItem>, user_id: Option<UserId>) -> Self {
        Self {
            id: QuoteId::generate(),
            user_id,
            customer_name: contact.name,
            customer_email: contact.email,
            customer_phone: contact.phone,
            message: contact.message,
            items,
            created_at: current_timestamp(),
            status: QuoteStatus::New,
        }
    }

    /// Whether this quote belongs to a customer account, matched by
    /// user id or (case-insensitively) by email.
    pub fn belongs_to(&self, user_id: &UserId, email: &str) -> bool {
        self.user_id.as_ref() == Some(user_id)
            || self.customer_email.eq_ignore_ascii_case(email)
    }
}

/// A contact-page inquiry form, pre-validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Company name, optional.
    pub company: Option<String>,
    /// Free-form service/inquiry category.
    pub service: String,
    pub message: String,
}

impl ContactForm {
    /// Validate required fields. Called before any side effect.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::Validation("name is required".into()));
        }
        if self.email.trim().is_empty() {
            return Err(CatalogError::Validation("email is required".into()));
        }
        if self.phone.trim().is_empty() {
            return Err(CatalogError::Validation("phone is required".into()));
        }
        if self.message.trim().is_empty() {
            return Err(CatalogError::Validation("message is required".into()));
        }
        Ok(())
    }
}

/// A persisted contact-page inquiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    /// Unique message identifier.
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Company name, optional.
    pub company: Option<String>,
    /// Free-form service/inquiry category.
    pub service: String,
    pub message: String,
    /// Unix timestamp of submission.
    pub created_at: i64,
    /// Current lifecycle status.
    pub status: ContactStatus,
}

impl ContactMessage {
    /// Build a new message from a validated form.
    pub fn new(form: ContactForm) -> Self {
        Self {
            id: MessageId::generate(),
            name: form.name,
            email: form.email,
            phone: form.phone,
            company: form.company,
            service: form.service,
            message: form.message,
            created_at: current_timestamp(),
            status: ContactStatus::New,
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
