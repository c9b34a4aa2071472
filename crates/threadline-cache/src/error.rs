//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Session token unknown or revoked.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Session token past its expiry.
    #[error("Session expired: {0}")]
    SessionExpired(String),
}

impl CacheError {
    /// Whether the error means the caller is not (or no longer) signed in.
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            CacheError::SessionNotFound(_) | CacheError::SessionExpired(_)
        )
    }
}
