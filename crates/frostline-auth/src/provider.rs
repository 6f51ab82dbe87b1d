//! Auth provider contract.
//!
//! The engine consumes authentication as an opaque capability: sign in,
//! sign up, sign out, and profile updates, all returning customer records.
//! Password storage, token refresh, and the rest live behind the provider.

use crate::customer::{Customer, ProfilePatch};
use crate::AuthError;
use async_trait::async_trait;
use frostline_commerce::ids::UserId;
use std::collections::HashMap;
use std::sync::Mutex;

/// Profile fields collected at sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProfile {
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
}

/// The opaque authentication capability.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Sign an existing customer in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Customer, AuthError>;

    /// Register a new customer account.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: NewProfile,
    ) -> Result<Customer, AuthError>;

    /// End the current provider session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Apply a partial profile update to an account.
    async fn update_profile(&self, id: &UserId, patch: ProfilePatch)
        -> Result<Customer, AuthError>;
}

/// In-memory [`AuthProvider`] for tests and local development. Accounts
/// are keyed by lowercased email.
#[derive(Debug, Default)]
pub struct MemoryAuth {
    accounts: Mutex<HashMap<String, (String, Customer)>>,
}

impl MemoryAuth {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, (String, Customer)>>, AuthError> {
        self.accounts
            .lock()
            .map_err(|_| AuthError::Provider("accounts mutex poisoned".into()))
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Customer, AuthError> {
        let accounts = self.lock()?;
        match accounts.get(&email.to_lowercase()) {
            Some((stored, customer)) if stored == password => Ok(customer.clone()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: NewProfile,
    ) -> Result<Customer, AuthError> {
        let key = email.to_lowercase();
        let mut accounts = self.lock()?;
        if accounts.contains_key(&key) {
            return Err(AuthError::EmailTaken(email.to_string()));
        }

        let mut customer = Customer::new(profile.name, email, profile.phone);
        customer.address = profile.address;
        accounts.insert(key, (password.to_string(), customer.clone()));
        Ok(customer)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        patch: ProfilePatch,
    ) -> Result<Customer, AuthError> {
        let mut accounts = self.lock()?;
        for (_, customer) in accounts.values_mut() {
            if &customer.id == id {
                patch.apply(customer);
                return Ok(customer.clone());
            }
        }
        Err(AuthError::AccountNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let auth = MemoryAuth::new();
        let profile = NewProfile {
            name: "Ana".into(),
            phone: "123".into(),
            address: None,
        };
        let created = auth.sign_up("Ana@Example.com", "pw", profile).await.unwrap();

        // Email lookup is case-insensitive.
        let signed_in = auth.sign_in("ana@example.com", "pw").await.unwrap();
        assert_eq!(signed_in.id, created.id);

        assert!(auth.sign_in("ana@example.com", "wrong").await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let auth = MemoryAuth::new();
        auth.sign_up("ana@example.com", "pw", NewProfile::default())
            .await
            .unwrap();

        let err = auth
            .sign_up("ANA@example.com", "pw2", NewProfile::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken(_)));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let auth = MemoryAuth::new();
        let created = auth
            .sign_up("ana@example.com", "pw", NewProfile::default())
            .await
            .unwrap();

        let patch = ProfilePatch {
            name: Some("Ana Silva".into()),
            ..Default::default()
        };
        let updated = auth.update_profile(&created.id, patch).await.unwrap();
        assert_eq!(updated.name, "Ana Silva");

        let err = auth
            .update_profile(&UserId::new("missing"), ProfilePatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountNotFound(_)));
    }
}
