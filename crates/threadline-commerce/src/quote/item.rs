//! Quote line items and their keys.

use crate::catalog::{ColorOption, Product};
use crate::error::CommerceError;
use crate::ids::{ProductId, QuoteItemId};
use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, CONTROLS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reference to an uploaded file (logo or design artwork).
///
/// The quote model carries these but never reads the file behind them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileHandle(String);

impl FileHandle {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Files attached to a quote line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_file: Option<FileHandle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_file: Option<FileHandle>,
}

impl Attachments {
    /// Combine with a newer set of files; a newly supplied file replaces the
    /// old one, an omitted file keeps the old one.
    pub fn overlay(&self, newer: &Attachments) -> Attachments {
        Attachments {
            logo_file: newer.logo_file.clone().or_else(|| self.logo_file.clone()),
            design_file: newer
                .design_file
                .clone()
                .or_else(|| self.design_file.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.logo_file.is_none() && self.design_file.is_none()
    }
}

/// One personalized jersey: player name, number and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    pub name: String,
    pub number: String,
    pub size: String,
}

impl Customization {
    pub fn new(name: impl Into<String>, number: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            size: size.into(),
        }
    }
}

/// Units requested per size label (e.g., `{"M": 12, "L": 8}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeQuantities(BTreeMap<String, u32>);

impl SizeQuantities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, size: impl Into<String>, quantity: u32) -> Self {
        self.0.insert(size.into(), quantity);
        self
    }

    pub fn insert(&mut self, size: impl Into<String>, quantity: u32) {
        self.0.insert(size.into(), quantity);
    }

    pub fn get(&self, size: &str) -> Option<u32> {
        self.0.get(size).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(size, qty)| (size.as_str(), *qty))
    }

    /// Number of sizes listed (including zero entries).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all units.
    pub fn total(&self) -> u64 {
        self.0.values().map(|q| u64::from(*q)).sum()
    }

    /// Copy with zero-quantity sizes dropped.
    pub fn without_zeros(&self) -> SizeQuantities {
        SizeQuantities(
            self.0
                .iter()
                .filter(|(_, qty)| **qty > 0)
                .map(|(size, qty)| (size.clone(), *qty))
                .collect(),
        )
    }

    /// Per-size sum of two quantity maps.
    pub fn merged(&self, other: &SizeQuantities) -> Result<SizeQuantities, CommerceError> {
        let mut merged = self.0.clone();
        for (size, qty) in &other.0 {
            let entry = merged.entry(size.clone()).or_insert(0);
            *entry = entry
                .checked_add(*qty)
                .ok_or_else(|| CommerceError::Overflow(size.clone()))?;
        }
        Ok(SizeQuantities(merged))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for SizeQuantities {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        SizeQuantities(iter.into_iter().map(|(s, q)| (s.into(), q)).collect())
    }
}

/// Identity of a quote line.
///
/// Mergeable lines are keyed by product and color so repeat adds coalesce.
/// Personalized lines carry a nonce and never coalesce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum QuoteKey {
    #[serde(rename_all = "camelCase")]
    Mergeable {
        product_id: ProductId,
        color_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Unique {
        product_id: ProductId,
        color_name: String,
        nonce: String,
    },
}

impl QuoteKey {
    pub fn mergeable(product_id: ProductId, color_name: impl Into<String>) -> Self {
        QuoteKey::Mergeable {
            product_id,
            color_name: color_name.into(),
        }
    }

    /// A key that no other key will ever equal.
    pub fn unique(product_id: ProductId, color_name: impl Into<String>) -> Self {
        QuoteKey::Unique {
            product_id,
            color_name: color_name.into(),
            nonce: crate::ids::generate_nonce(),
        }
    }

    pub fn is_mergeable(&self) -> bool {
        matches!(self, QuoteKey::Mergeable { .. })
    }

    pub fn product_id(&self) -> &ProductId {
        match self {
            QuoteKey::Mergeable { product_id, .. } | QuoteKey::Unique { product_id, .. } => {
                product_id
            }
        }
    }

    /// The textual line ID the UI uses for removal.
    pub fn item_id(&self) -> QuoteItemId {
        QuoteItemId::new(self.to_string())
    }
}

/// Escaped inside product IDs and color names so that `-` only separates parts.
const ID_PART: &AsciiSet = &CONTROLS.add(b'%').add(b'-');

fn id_part(part: &str) -> PercentEncode<'_> {
    utf8_percent_encode(part, ID_PART)
}

impl fmt::Display for QuoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteKey::Mergeable {
                product_id,
                color_name,
            } => write!(f, "{}-{}", id_part(product_id.as_str()), id_part(color_name)),
            QuoteKey::Unique {
                product_id,
                color_name,
                nonce,
            } => write!(
                f,
                "{}-{}-{}",
                id_part(product_id.as_str()),
                id_part(color_name),
                nonce
            ),
        }
    }
}

/// A line in the quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    quote_item_id: QuoteItemId,
    key: QuoteKey,
    /// Product snapshot at the time it was added.
    pub product: Product,
    pub selected_color: ColorOption,
    pub size_quantities: SizeQuantities,
    #[serde(flatten)]
    pub attachments: Attachments,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customizations: Vec<Customization>,
}

impl QuoteItem {
    pub(crate) fn new(
        key: QuoteKey,
        product: Product,
        selected_color: ColorOption,
        size_quantities: SizeQuantities,
        attachments: Attachments,
        customizations: Vec<Customization>,
    ) -> Self {
        Self {
            quote_item_id: key.item_id(),
            key,
            product,
            selected_color,
            size_quantities,
            attachments,
            customizations,
        }
    }

    pub fn id(&self) -> &QuoteItemId {
        &self.quote_item_id
    }

    pub fn key(&self) -> &QuoteKey {
        &self.key
    }

    pub fn is_mergeable(&self) -> bool {
        self.key.is_mergeable()
    }

    /// Total units across all sizes.
    pub fn total_units(&self) -> u64 {
        self.size_quantities.total()
    }
}
