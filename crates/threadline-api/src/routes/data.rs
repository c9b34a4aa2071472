//! `/api/data/:key` handlers.

use http::header::{HeaderValue, CACHE_CONTROL};
use http::{HeaderMap, StatusCode};
use threadline_commerce::{CatalogueView, Product};
use threadline_observability::StructuredLogger;

use crate::response::{self, Success};
use crate::{ApiError, ApiResponse, App};

/// Key holding the product catalogue.
pub const PRODUCTS_KEY: &str = "products";

const MAX_KEY_LEN: usize = 64;

/// Keys are 1-64 chars of `[A-Za-z0-9_-]`.
pub fn validate_key(key: &str) -> Result<(), ApiError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("invalid key: {}", key)))
    }
}

/// `GET /api/data/:key`
pub fn get(
    app: &App,
    key: &str,
    query: Option<&str>,
    logger: &StructuredLogger,
) -> Result<ApiResponse, ApiError> {
    validate_key(key)?;
    if key == PRODUCTS_KEY {
        return products(app, query.unwrap_or_default(), logger);
    }

    match app.cache().get_raw(key)? {
        Some(bytes) => response::raw_json(StatusCode::OK, bytes),
        None => Err(ApiError::NotFound(format!("key {}", key))),
    }
}

/// The catalogue, optionally filtered and sorted by query parameters.
fn products(app: &App, query: &str, logger: &StructuredLogger) -> Result<ApiResponse, ApiError> {
    let body = if query.trim().is_empty() {
        app.cache()
            .get_raw(PRODUCTS_KEY)?
            .unwrap_or_else(|| b"[]".to_vec())
    } else {
        let products: Vec<Product> = app.cache().get(PRODUCTS_KEY)?.unwrap_or_default();
        let view = CatalogueView::from_query(&products, query)?;
        logger
            .info_builder("catalogue filtered")
            .field("sort", view.sort.as_str())
            .field_i64("matched", view.total as i64)
            .field_i64("catalogue", products.len() as i64)
            .emit();
        serde_json::to_vec(&view.products)
            .map_err(|e| ApiError::Internal(format!("failed to encode products: {}", e)))?
    };

    let mut response = response::raw_json(StatusCode::OK, body)?;
    let cache_control = HeaderValue::from_str(&app.config().http.products_cache_control)
        .map_err(|e| ApiError::Config(format!("invalid products_cache_control: {}", e)))?;
    response.headers_mut().insert(CACHE_CONTROL, cache_control);
    Ok(response)
}

/// `POST /api/data/:key` (admin only).
pub fn put(
    app: &App,
    key: &str,
    headers: &HeaderMap,
    body: &[u8],
    logger: &StructuredLogger,
) -> Result<ApiResponse, ApiError> {
    let session = app.require_admin(headers)?;
    validate_key(key)?;

    let value: serde_json::Value = serde_json::from_slice(body)?;
    if key == PRODUCTS_KEY {
        let products: Vec<Product> = serde_json::from_value(value).map_err(|e| {
            ApiError::BadRequest(format!("products must be an array of products: {}", e))
        })?;
        logger
            .info_builder("catalogue replaced")
            .field_i64("count", products.len() as i64)
            .emit();
    }

    // Stored as sent so reads return the admin's exact document.
    app.cache().set_raw(key, body)?;
    logger
        .info_builder("data stored")
        .field("key", key)
        .field("admin", session.username)
        .emit();
    response::json(StatusCode::OK, &Success::ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("products").is_ok());
        assert!(validate_key("hero_banner-2").is_ok());
        assert!(validate_key(&"k".repeat(64)).is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key(&"k".repeat(65)).is_err());
        assert!(validate_key("a.b").is_err());
        assert!(validate_key("caf%C3%A9").is_err());
    }
}
