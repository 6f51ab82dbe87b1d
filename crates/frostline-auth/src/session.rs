//! Session values.
//!
//! Authorization is a parameter, not ambient state: every gated operation
//! takes a `&Session` and decides from the variant. There is no global
//! "is admin" flag anywhere in the engine.

use crate::customer::Customer;
use crate::AuthError;
use frostline_commerce::ids::UserId;
use serde::{Deserialize, Serialize};

/// Who is acting. Passed explicitly to any operation requiring
/// authorization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Session {
    /// Not signed in.
    #[default]
    Anonymous,
    /// A signed-in customer account.
    Customer(Customer),
    /// The shared back-office credential.
    Admin,
}

impl Session {
    /// Check whether this session may perform admin mutations.
    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin)
    }

    /// The customer record, if this is a customer session.
    pub fn customer(&self) -> Option<&Customer> {
        match self {
            Session::Customer(c) => Some(c),
            _ => None,
        }
    }

    /// The customer account id, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        self.customer().map(|c| &c.id)
    }

    /// Require an admin session.
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_gating() {
        assert!(Session::Admin.require_admin().is_ok());
        assert!(Session::Anonymous.require_admin().is_err());

        let customer = Customer::new("Ana", "ana@example.com", "123");
        assert!(Session::Customer(customer).require_admin().is_err());
    }

    #[test]
    fn test_user_id_only_for_customers() {
        let customer = Customer::new("Ana", "ana@example.com", "123");
        let id = customer.id.clone();

        assert_eq!(Session::Customer(customer).user_id(), Some(&id));
        assert_eq!(Session::Admin.user_id(), None);
        assert_eq!(Session::Anonymous.user_id(), None);
    }
}
