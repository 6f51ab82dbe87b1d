//! Shared-credential admin gate.

use crate::session::Session;
use crate::AuthError;

/// Verifies the single shared back-office credential and yields
/// [`Session::Admin`]. This is deliberately not a user account.
#[derive(Debug, Clone)]
pub struct AdminGate {
    username: String,
    password: String,
}

impl AdminGate {
    /// Create a gate for a configured credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Verify a credential pair.
    pub fn sign_in(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username == self.username && password == self.password {
            Ok(Session::Admin)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_credentials_yield_admin() {
        let gate = AdminGate::new("backoffice", "s3cret");
        let session = gate.sign_in("backoffice", "s3cret").unwrap();
        assert!(session.is_admin());
    }

    #[test]
    fn test_wrong_credentials_rejected() {
        let gate = AdminGate::new("backoffice", "s3cret");
        assert!(gate.sign_in("backoffice", "wrong").is_err());
        assert!(gate.sign_in("someone", "s3cret").is_err());
    }
}
