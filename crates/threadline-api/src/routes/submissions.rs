//! `/api/quotes` handlers.

use http::{HeaderMap, StatusCode};
use serde::Serialize;
use threadline_commerce::QuoteSubmission;
use threadline_observability::{RequestId, StructuredLogger};

use crate::quotes::QuoteRecord;
use crate::response::{self, Success};
use crate::{ApiError, ApiResponse, App};

#[derive(Debug, Serialize)]
struct Accepted {
    id: String,
}

/// `POST /api/quotes`
pub fn submit(app: &App, body: &[u8], logger: &StructuredLogger) -> Result<ApiResponse, ApiError> {
    let submission: QuoteSubmission = serde_json::from_slice(body)?;
    submission.validate()?;

    let record = QuoteRecord::new(format!("q_{}", RequestId::generate()), submission);
    app.quotes().append(&record)?;

    logger
        .info_builder("quote received")
        .field("quote_id", record.id.as_str())
        .field_i64("lines", record.items.len() as i64)
        .field_i64("units", record.total_units as i64)
        .emit();

    response::json(StatusCode::OK, &Success::with(Accepted { id: record.id }))
}

/// `GET /api/quotes` (admin only), newest first.
pub fn list(app: &App, headers: &HeaderMap) -> Result<ApiResponse, ApiError> {
    app.require_admin(headers)?;
    let records = app.quotes().list()?;
    response::json(StatusCode::OK, &records)
}
