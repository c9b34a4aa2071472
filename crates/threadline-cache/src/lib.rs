//! Type-safe Key-Value storage for Threadline.
//!
//! Wraps Spin's Key-Value Store (or an in-memory map off-wasm) with
//! automatic JSON serialization, and keeps admin sessions on top of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use threadline_cache::Cache;
//!
//! let cache = Cache::open_default()?;
//!
//! cache.set("products", &products)?;
//! let products: Option<Vec<Product>> = cache.get("products")?;
//! cache.delete("products")?;
//! ```

mod backend;
mod error;
mod kv;
mod session;

pub use backend::{KvBackend, MemoryBackend};
#[cfg(target_arch = "wasm32")]
pub use backend::SpinBackend;
pub use error::CacheError;
pub use kv::Cache;
pub use session::{AdminSession, SessionId, SessionStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{AdminSession, Cache, CacheError, SessionId, SessionStore};
}
