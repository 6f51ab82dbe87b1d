//! Key-value store abstraction with automatic JSON serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// A scoped key-value store holding JSON-encoded values.
///
/// The typed `get`/`set` helpers serialize through `serde_json`; backends
/// only deal in raw bytes.
pub trait KeyValueStore: Send + Sync {
    /// Get the raw bytes stored under a key, if any.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store raw bytes under a key, replacing any existing value.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError>;

    /// List all keys in the store.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        Self: Sized,
    {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the store.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        Self: Sized,
    {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }
}

/// In-memory [`KeyValueStore`]. Clones share the same underlying map,
/// which is what makes it usable as a shared store in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>, CacheError> {
        self.inner
            .lock()
            .map_err(|_| CacheError::Store("store mutex poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.lock()?.contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("basket", store_id);
/// // Returns "basket:store-1"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_round_trip() {
        let store = MemoryStore::new();
        store.set("greeting", &"hello".to_string()).unwrap();

        let value: Option<String> = store.get("greeting").unwrap();
        assert_eq!(value.as_deref(), Some("hello"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        let value: Option<String> = store.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_delete_and_exists() {
        let store = MemoryStore::new();
        store.set("k", &1u32).unwrap();
        assert!(store.exists("k").unwrap());

        store.delete("k").unwrap();
        assert!(!store.exists("k").unwrap());

        // Deleting again is fine.
        store.delete("k").unwrap();
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("shared", &42u32).unwrap();

        let value: Option<u32> = other.get("shared").unwrap();
        assert_eq!(value, Some(42));
    }

    #[test]
    fn test_cache_key_macro() {
        let key = cache_key!("basket", "store-1");
        assert_eq!(key, "basket:store-1");

        let key = cache_key!("quote", "u1", 7);
        assert_eq!(key, "quote:u1:7");
    }
}
