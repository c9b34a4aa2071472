//! Observability for the Threadline API.
//!
//! This crate provides:
//! - `RequestId` - Unique request identifier for log correlation
//! - `StructuredLogger` - Structured logging with request context
//! - `LogBuilder` - Fluent construction of entries with typed fields

mod logging;
mod request;

pub use logging::*;
pub use request::RequestId;
