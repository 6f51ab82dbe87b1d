//! Customer account records.

use frostline_commerce::ids::UserId;
use serde::{Deserialize, Serialize};

/// A customer account. Distinct from admin: admin is a shared credential
/// gate, not a customer record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    /// Unique account identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Delivery/billing address, optional.
    pub address: Option<String>,
    /// Unix timestamp the account was created.
    pub joined_at: i64,
}

impl Customer {
    /// Create a new account record.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: None,
            joined_at: current_timestamp(),
        }
    }
}

/// Partial update to the signed-in customer's profile. `None` fields are
/// left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ProfilePatch {
    /// Apply the patch to a customer record.
    pub fn apply(&self, customer: &mut Customer) {
        if let Some(name) = &self.name {
            customer.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            customer.phone = phone.clone();
        }
        if let Some(address) = &self.address {
            customer.address = Some(address.clone());
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
