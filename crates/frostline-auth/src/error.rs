//! Auth error types.

use thiserror::Error;

/// Errors that can occur in authentication and authorization.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email/password pair did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An account already exists for this email.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// No account exists for this identifier.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// The session does not permit this operation.
    #[error("Operation not permitted for this session")]
    Unauthorized,

    /// The auth provider failed.
    #[error("Auth provider error: {0}")]
    Provider(String),
}
