//! JSON response helpers.

use http::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use http::{Response, StatusCode};
use serde::Serialize;

use crate::{ApiError, ApiResponse};

const JSON: &str = "application/json";

/// `{ "success": true }` plus optional extra fields.
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize = ()> {
    pub success: bool,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl Success {
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
        }
    }
}

impl<T: Serialize> Success<T> {
    pub fn with(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

/// Serialize `value` as the response body.
pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<ApiResponse, ApiError> {
    let body = serde_json::to_vec(value)
        .map_err(|e| ApiError::Internal(format!("failed to encode response: {}", e)))?;
    raw_json(status, body)
}

/// Send already-encoded JSON.
pub fn raw_json(status: StatusCode, body: Vec<u8>) -> Result<ApiResponse, ApiError> {
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, JSON)
        .body(body)?)
}

/// `{ "message": ... }` with the error's status.
pub fn error(err: &ApiError) -> ApiResponse {
    let body = serde_json::json!({ "message": err.public_message() }).to_string();
    let mut response = Response::new(body.into_bytes());
    *response.status_mut() = err.status();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON));

    if let ApiError::MethodNotAllowed { allow, .. } = err {
        if let Ok(value) = HeaderValue::from_str(allow) {
            response.headers_mut().insert(ALLOW, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body() {
        let response = json(StatusCode::OK, &Success::ok()).unwrap();
        assert_eq!(response.body(), br#"{"success":true}"#);

        #[derive(Serialize)]
        struct Token {
            token: &'static str,
        }
        let response = json(StatusCode::OK, &Success::with(Token { token: "t" })).unwrap();
        assert_eq!(response.body(), br#"{"success":true,"token":"t"}"#);
    }

    #[test]
    fn test_error_body() {
        let response = error(&ApiError::NotFound("key banner".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.body(), br#"{"message":"Not found: key banner"}"#);
        assert_eq!(response.headers()[CONTENT_TYPE], JSON);
    }

    #[test]
    fn test_method_not_allowed_sets_allow() {
        let response = error(&ApiError::MethodNotAllowed {
            method: "DELETE".into(),
            path: "/api/quotes".into(),
            allow: "GET, POST".into(),
        });
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, POST");
    }
}
