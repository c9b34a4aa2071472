//! HTTP API for the Threadline storefront.
//!
//! Serves site content out of the Key-Value store, signs in the admin,
//! and accepts quote submissions. Runs as a Spin HTTP component on wasm32;
//! elsewhere [`App::handle`] can be driven directly with `http` types.
//!
//! Routes:
//! - `GET  /api/data/:key` - stored JSON (`products` can be filtered by query)
//! - `POST /api/data/:key` - replace stored JSON (admin)
//! - `POST /api/auth/login` - exchange the admin credentials for a token
//! - `POST /api/quotes` - submit a quote request
//! - `GET  /api/quotes` - list submitted quotes (admin)

mod app;
pub mod auth;
pub mod config;
mod error;
pub mod quotes;
pub mod response;
pub mod routes;

#[cfg(target_arch = "wasm32")]
mod component;

pub use app::App;
pub use config::ApiConfig;
pub use error::ApiError;
pub use quotes::{KvQuoteSink, QuoteRecord, QuoteSink};

/// Request type handled by [`App`].
pub type ApiRequest = http::Request<Vec<u8>>;
/// Response type produced by [`App`].
pub type ApiResponse = http::Response<Vec<u8>>;
