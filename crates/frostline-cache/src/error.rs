//! Cache error types.

use thiserror::Error;

/// Errors that can occur in key-value store operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The underlying store failed.
    #[error("Store error: {0}")]
    Store(String),

    /// A stored value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
