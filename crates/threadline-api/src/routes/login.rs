//! `/api/auth/login` and `/api/auth/logout` handlers.

use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use threadline_observability::StructuredLogger;

use crate::auth::verify_credentials;
use crate::response::{self, Success};
use crate::{ApiError, ApiResponse, App};

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginGranted {
    token: String,
    expires_at: i64,
}

/// `POST /api/auth/login`
pub fn login(app: &App, body: &[u8], logger: &StructuredLogger) -> Result<ApiResponse, ApiError> {
    let request: LoginRequest = serde_json::from_slice(body)?;

    if !verify_credentials(&app.config().admin, &request.username, &request.password) {
        logger
            .warn_builder("login refused")
            .field("username", request.username)
            .emit();
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let session = app.sessions().create(&request.username)?;
    logger
        .info_builder("admin signed in")
        .field("username", session.username.as_str())
        .emit();

    response::json(
        StatusCode::OK,
        &Success::with(LoginGranted {
            token: session.id.to_string(),
            expires_at: session.expires_at,
        }),
    )
}

/// `POST /api/auth/logout` (admin only). The token stops working immediately.
pub fn logout(
    app: &App,
    headers: &HeaderMap,
    logger: &StructuredLogger,
) -> Result<ApiResponse, ApiError> {
    let session = app.require_admin(headers)?;
    app.sessions().revoke(&session.id)?;
    logger
        .info_builder("admin signed out")
        .field("username", session.username)
        .emit();

    response::json(StatusCode::OK, &Success::ok())
}
