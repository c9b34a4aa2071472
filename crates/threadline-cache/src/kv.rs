//! Key-Value store wrapper with automatic serialization.

use crate::backend::{KvBackend, MemoryBackend};
use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Type-safe cache over a [`KvBackend`].
///
/// Values are stored as JSON. Clones share the same backend.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap an explicit backend.
    pub fn with_backend(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A fresh, empty in-memory cache.
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    /// Open the default Key-Value store.
    ///
    /// Off-wasm this is an empty in-memory store.
    pub fn open_default() -> Result<Self, CacheError> {
        #[cfg(target_arch = "wasm32")]
        {
            Ok(Self::with_backend(crate::backend::SpinBackend::open_default()?))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(Self::in_memory())
        }
    }

    /// Open a named Key-Value store.
    ///
    /// ```rust,ignore
    /// let cache = Cache::open("threadline")?;
    /// ```
    pub fn open(name: &str) -> Result<Self, CacheError> {
        #[cfg(target_arch = "wasm32")]
        {
            Ok(Self::with_backend(crate::backend::SpinBackend::open(name)?))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = name;
            Ok(Self::in_memory())
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Get the stored bytes without decoding.
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.backend.get(key)
    }

    /// Store bytes verbatim.
    pub fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.backend.set(key, bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }

    /// Keys that start with `prefix`.
    ///
    /// ```rust,ignore
    /// let quotes = cache.keys_with_prefix("quote:")?;
    /// ```
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, CacheError> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect())
    }
}

/// Helper to build cache keys with namespacing.
///
/// ```rust,ignore
/// let key = cache_key!("quote", id);
/// // Returns "quote:<id>"
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
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Banner {
        headline: String,
        visible: bool,
    }

    #[test]
    fn test_typed_round_trip() {
        let cache = Cache::in_memory();
        let banner = Banner {
            headline: "Team orders ship in 10 days".to_string(),
            visible: true,
        };

        cache.set("banner", &banner).unwrap();
        assert_eq!(cache.get::<Banner>("banner").unwrap(), Some(banner));
        assert_eq!(cache.get::<Banner>("missing").unwrap(), None);
    }

    #[test]
    fn test_decode_mismatch_is_error() {
        let cache = Cache::in_memory();
        cache.set_raw("banner", b"[1,2,3]").unwrap();
        assert!(matches!(
            cache.get::<Banner>("banner"),
            Err(CacheError::SerializeError(_))
        ));
    }

    #[test]
    fn test_clones_share_backend() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set("count", &3u32).unwrap();
        assert_eq!(other.get::<u32>("count").unwrap(), Some(3));
    }

    #[test]
    fn test_keys_with_prefix() {
        let cache = Cache::in_memory();
        cache.set("quote:1", &1).unwrap();
        cache.set("quote:2", &2).unwrap();
        cache.set("products", &Vec::<u8>::new()).unwrap();

        let keys = cache.keys_with_prefix("quote:").unwrap();
        assert_eq!(keys, vec!["quote:1".to_string(), "quote:2".to_string()]);
    }

    #[test]
    fn test_delete_and_exists() {
        let cache = Cache::in_memory();
        cache.set("k", &"v").unwrap();
        assert!(cache.exists("k").unwrap());
        cache.delete("k").unwrap();
        assert!(!cache.exists("k").unwrap());
    }

    #[test]
    fn test_cache_key_macro() {
        let id = "abc";
        assert_eq!(cache_key!("quote", id), "quote:abc");
        assert_eq!(cache_key!("session", "x", 7), "session:x:7");
    }
}
