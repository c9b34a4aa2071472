//! Submitted quote storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use threadline_cache::{cache_key, Cache};
use threadline_commerce::{ContactDetails, QuoteSubmission, SubmittedQuoteItem};

use crate::ApiError;

/// A submission as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    pub contact: ContactDetails,
    pub items: Vec<SubmittedQuoteItem>,
    pub total_units: u64,
}

impl QuoteRecord {
    /// Stamp a validated submission.
    pub fn new(id: impl Into<String>, submission: QuoteSubmission) -> Self {
        Self {
            id: id.into(),
            submitted_at: Utc::now(),
            total_units: submission.total_units(),
            contact: submission.contact,
            items: submission.items,
        }
    }

    pub fn with_submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = at;
        self
    }
}

/// Where accepted quotes go.
pub trait QuoteSink {
    fn append(&self, record: &QuoteRecord) -> Result<(), ApiError>;

    /// All stored records, newest first.
    fn list(&self) -> Result<Vec<QuoteRecord>, ApiError>;
}

/// Stores each quote under `quote:<id>` in the Key-Value store.
#[derive(Debug, Clone)]
pub struct KvQuoteSink {
    cache: Cache,
}

impl KvQuoteSink {
    pub const PREFIX: &'static str = "quote";

    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

impl QuoteSink for KvQuoteSink {
    fn append(&self, record: &QuoteRecord) -> Result<(), ApiError> {
        let key = cache_key!(Self::PREFIX, record.id);
        if self.cache.exists(&key)? {
            return Err(ApiError::Internal(format!("duplicate quote id {}", record.id)));
        }
        self.cache.set(&key, record)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<QuoteRecord>, ApiError> {
        let prefix = format!("{}:", Self::PREFIX);
        let mut records = Vec::new();
        for key in self.cache.keys_with_prefix(&prefix)? {
            if let Some(record) = self.cache.get::<QuoteRecord>(&key)? {
                records.push(record);
            }
        }
        records.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submission() -> QuoteSubmission {
        serde_json::from_value(serde_json::json!({
            "contact": {"name": "Sam", "email": "sam@fc.example", "phone": "0400"},
            "items": [{
                "quoteItemId": "P1-Blue",
                "productId": "P1",
                "productName": "Training Top",
                "color": {"name": "Blue", "hex": "#0000ff"},
                "sizeQuantities": {"S": 4, "M": 6}
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_record_totals() {
        let record = QuoteRecord::new("q1", submission());
        assert_eq!(record.total_units, 10);
        assert_eq!(record.contact.name, "Sam");
    }

    #[test]
    fn test_list_newest_first() {
        let sink = KvQuoteSink::new(Cache::in_memory());
        let older = QuoteRecord::new("a", submission())
            .with_submitted_at(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        let newer = QuoteRecord::new("b", submission())
            .with_submitted_at(Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap());

        sink.append(&older).unwrap();
        sink.append(&newer).unwrap();

        let ids: Vec<String> = sink.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let sink = KvQuoteSink::new(Cache::in_memory());
        let record = QuoteRecord::new("dup", submission());
        sink.append(&record).unwrap();
        assert!(sink.append(&record).is_err());
    }

    #[test]
    fn test_wire_format() {
        let record = QuoteRecord::new("q9", submission())
            .with_submitted_at(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["submittedAt"], "2024-05-06T07:08:09Z");
        assert_eq!(json["totalUnits"], 10);
    }
}
