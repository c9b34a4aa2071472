//! Admin session management using the Key-Value store.

use crate::{Cache, CacheError};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A unique session identifier, used as the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new cryptographically secure session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub id: SessionId,
    pub username: String,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp when the session stops being accepted.
    pub expires_at: i64,
}

impl AdminSession {
    /// Default session duration: 12 hours.
    pub const DEFAULT_DURATION_SECS: i64 = 12 * 60 * 60;

    fn start(username: impl Into<String>, duration_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: SessionId::generate(),
            username: username.into(),
            created_at: now,
            expires_at: now + duration_secs,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.expires_at
    }

    /// Seconds left, never negative.
    pub fn time_to_expiry(&self) -> i64 {
        (self.expires_at - Utc::now().timestamp()).max(0)
    }
}

/// Issues, checks and revokes admin sessions.
///
/// ```rust,ignore
/// let sessions = SessionStore::new(cache);
/// let session = sessions.create("admin")?;
/// let checked = sessions.validate(&session.id)?;
/// ```
#[derive(Debug, Clone)]
pub struct SessionStore {
    cache: Cache,
    duration_secs: i64,
}

impl SessionStore {
    pub fn new(cache: Cache) -> Self {
        Self {
            cache,
            duration_secs: AdminSession::DEFAULT_DURATION_SECS,
        }
    }

    /// Override how long new sessions live.
    pub fn with_duration(mut self, duration_secs: i64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    pub fn duration_secs(&self) -> i64 {
        self.duration_secs
    }

    /// Start a session for `username` and persist it.
    pub fn create(&self, username: &str) -> Result<AdminSession, CacheError> {
        let session = AdminSession::start(username, self.duration_secs);
        self.cache.set(&session_key(&session.id), &session)?;
        Ok(session)
    }

    /// Look up a live session. Expired sessions are removed.
    pub fn validate(&self, id: &SessionId) -> Result<AdminSession, CacheError> {
        let key = session_key(id);
        let session = self
            .cache
            .get::<AdminSession>(&key)?
            .ok_or_else(|| CacheError::SessionNotFound(id.to_string()))?;

        if session.is_expired() {
            self.cache.delete(&key)?;
            return Err(CacheError::SessionExpired(id.to_string()));
        }
        Ok(session)
    }

    /// Forget a session. Unknown IDs are ignored.
    pub fn revoke(&self, id: &SessionId) -> Result<(), CacheError> {
        self.cache.delete(&session_key(id))
    }
}

fn session_key(id: &SessionId) -> String {
    crate::cache_key!("session", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_generate_format() {
        let id = SessionId::generate();
        let s = id.as_str();

        assert!(s.starts_with("sess_"));
        // 18 bytes of base64 = 24 chars
        assert_eq!(s.len(), 29);
    }

    #[test]
    fn test_session_id_generate_uniqueness() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_session_id_serialization() {
        let id = SessionId::new("sess_abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""sess_abc""#);
    }

    #[test]
    fn test_create_then_validate() {
        let store = SessionStore::new(Cache::in_memory());
        let session = store.create("admin").unwrap();

        let checked = store.validate(&session.id).unwrap();
        assert_eq!(checked.username, "admin");
        assert!(checked.time_to_expiry() > 0);
    }

    #[test]
    fn test_unknown_session() {
        let store = SessionStore::new(Cache::in_memory());
        let err = store.validate(&SessionId::new("sess_nope")).unwrap_err();
        assert!(matches!(err, CacheError::SessionNotFound(_)));
        assert!(err.is_session_error());
    }

    #[test]
    fn test_expired_session_is_removed() {
        let cache = Cache::in_memory();
        let store = SessionStore::new(cache.clone()).with_duration(0);
        let session = store.create("admin").unwrap();

        let err = store.validate(&session.id).unwrap_err();
        assert!(matches!(err, CacheError::SessionExpired(_)));
        assert!(!cache.exists(&session_key(&session.id)).unwrap());
    }

    #[test]
    fn test_revoke() {
        let store = SessionStore::new(Cache::in_memory());
        let session = store.create("admin").unwrap();
        store.revoke(&session.id).unwrap();
        assert!(store.validate(&session.id).is_err());
    }
}
