//! Admin credential checks and bearer tokens.

use http::header::AUTHORIZATION;
use http::HeaderMap;
use threadline_cache::SessionId;

use crate::config::AdminConfig;

/// Compare against the configured admin pair without short-circuiting on
/// the first differing byte. An empty configured password never matches.
pub fn verify_credentials(admin: &AdminConfig, username: &str, password: &str) -> bool {
    if admin.password.is_empty() {
        return false;
    }
    let user_ok = constant_time_compare(admin.username.as_bytes(), username.as_bytes());
    let pass_ok = constant_time_compare(admin.password.as_bytes(), password.as_bytes());
    user_ok & pass_ok
}

/// Session token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<SessionId> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(SessionId::new(token))
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
