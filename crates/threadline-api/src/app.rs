//! Request dispatch.

use http::header::HeaderValue;
use http::{HeaderMap, Method};
use threadline_cache::{AdminSession, Cache, SessionStore};
use threadline_observability::{RequestId, StructuredLogger};

use crate::auth::bearer_token;
use crate::config::ApiConfig;
use crate::quotes::{KvQuoteSink, QuoteSink};
use crate::routes::{data, login, submissions, Route};
use crate::{response, ApiError, ApiRequest, ApiResponse};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// The API: configuration plus its stores.
pub struct App {
    config: ApiConfig,
    cache: Cache,
    sessions: SessionStore,
    quotes: Box<dyn QuoteSink>,
}

impl App {
    /// Build over an already opened cache. Quotes go to the same store.
    pub fn new(config: ApiConfig, cache: Cache) -> Self {
        let sessions = SessionStore::new(cache.clone()).with_duration(config.session.ttl_secs);
        let quotes = Box::new(KvQuoteSink::new(cache.clone()));
        Self {
            config,
            cache,
            sessions,
            quotes,
        }
    }

    /// Open the configured Key-Value store.
    pub fn from_config(config: ApiConfig) -> Result<Self, ApiError> {
        let cache = if config.store.name == "default" {
            Cache::open_default()?
        } else {
            Cache::open(&config.store.name)?
        };
        Ok(Self::new(config, cache))
    }

    /// Send accepted quotes somewhere other than the Key-Value store.
    pub fn with_quote_sink(mut self, sink: impl QuoteSink + 'static) -> Self {
        self.quotes = Box::new(sink);
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn quotes(&self) -> &dyn QuoteSink {
        self.quotes.as_ref()
    }

    /// Handle one request. Errors become `{message}` responses.
    pub fn handle(&self, request: ApiRequest) -> ApiResponse {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(RequestId::from_string)
            .unwrap_or_else(RequestId::generate);

        let logger = StructuredLogger::new(request_id.clone())
            .with_method(request.method().as_str())
            .with_route(request.uri().path())
            .with_min_level(self.config.logging.level)
            .with_format(self.config.logging.format);

        let mut response = match self.dispatch(&request, &logger) {
            Ok(response) => response,
            Err(err) => {
                let builder = if err.status().is_server_error() {
                    logger.error_builder("request failed")
                } else {
                    logger.warn_builder("request rejected")
                };
                builder.field("error", err.to_string()).emit();
                response::error(&err)
            }
        };

        if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        logger.request_finished(response.status().as_u16());
        response
    }

    fn dispatch(
        &self,
        request: &ApiRequest,
        logger: &StructuredLogger,
    ) -> Result<ApiResponse, ApiError> {
        let path = request.uri().path();
        let route =
            Route::resolve(path).ok_or_else(|| ApiError::NotFound(format!("route {}", path)))?;

        let method = request.method();
        let body = request.body().as_slice();
        match (&route, method) {
            (Route::Data(key), &Method::GET) => data::get(self, key, request.uri().query(), logger),
            (Route::Data(key), &Method::POST) => {
                data::put(self, key, request.headers(), body, logger)
            }
            (Route::Login, &Method::POST) => login::login(self, body, logger),
            (Route::Logout, &Method::POST) => login::logout(self, request.headers(), logger),
            (Route::Quotes, &Method::POST) => submissions::submit(self, body, logger),
            (Route::Quotes, &Method::GET) => submissions::list(self, request.headers()),
            _ => Err(ApiError::MethodNotAllowed {
                method: method.to_string(),
                path: path.to_string(),
                allow: route.allow_header(),
            }),
        }
    }

    /// The admin session named by the bearer token.
    pub fn require_admin(&self, headers: &HeaderMap) -> Result<AdminSession, ApiError> {
        let token = bearer_token(headers)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;
        Ok(self.sessions.validate(&token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Request, StatusCode};

    fn app() -> App {
        App::new(ApiConfig::default(), Cache::in_memory())
    }

    fn get(uri: &str) -> ApiRequest {
        Request::builder().uri(uri).body(Vec::new()).unwrap()
    }

    #[test]
    fn test_unknown_route_is_404() {
        let response = app().handle(get("/api/nothing"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_wrong_method_is_405() {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/quotes")
            .body(Vec::new())
            .unwrap();
        let response = app().handle(request);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["allow"], "GET, POST");
    }

    #[test]
    fn test_request_id_is_echoed() {
        let request = Request::builder()
            .uri("/api/data/products")
            .header(REQUEST_ID_HEADER, "edge-123")
            .body(Vec::new())
            .unwrap();
        let response = app().handle(request);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "edge-123");
    }

    #[test]
    fn test_generated_request_id() {
        let response = app().handle(get("/api/data/products"));
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[test]
    fn test_admin_required() {
        let app = app();
        assert!(matches!(
            app.require_admin(&HeaderMap::new()),
            Err(ApiError::Unauthorized(_))
        ));

        let session = app.sessions().create("admin").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", session.id)).unwrap(),
        );
        assert_eq!(app.require_admin(&headers).unwrap().username, "admin");
    }
}
