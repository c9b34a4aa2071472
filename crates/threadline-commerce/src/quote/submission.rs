//! Quote submission payload.

use crate::catalog::ColorOption;
use crate::error::CommerceError;
use crate::ids::{ProductId, QuoteItemId};
use crate::quote::{Customization, QuoteItem, SizeQuantities};
use serde::{Deserialize, Serialize};

/// Who is asking for the quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A quote line as sent over the wire. File blobs are replaced by flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedQuoteItem {
    pub quote_item_id: QuoteItemId,
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub category: String,
    pub color: ColorOption,
    pub size_quantities: SizeQuantities,
    #[serde(default)]
    pub total_units: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customizations: Vec<Customization>,
    #[serde(default)]
    pub has_logo: bool,
    #[serde(default)]
    pub has_design: bool,
}

impl From<&QuoteItem> for SubmittedQuoteItem {
    fn from(item: &QuoteItem) -> Self {
        Self {
            quote_item_id: item.id().clone(),
            product_id: item.product.id.clone(),
            product_name: item.product.name.clone(),
            category: item.product.category.clone(),
            color: item.selected_color.clone(),
            size_quantities: item.size_quantities.clone(),
            total_units: item.total_units(),
            customizations: item.customizations.clone(),
            has_logo: item.attachments.logo_file.is_some(),
            has_design: item.attachments.design_file.is_some(),
        }
    }
}

/// Body of `POST /api/quotes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSubmission {
    pub contact: ContactDetails,
    pub items: Vec<SubmittedQuoteItem>,
}

impl QuoteSubmission {
    /// Check the submission before it is forwarded anywhere.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let contact = &self.contact;
        for (field, value) in [
            ("name", &contact.name),
            ("email", &contact.email),
            ("phone", &contact.phone),
        ] {
            if value.trim().is_empty() {
                return Err(CommerceError::ValidationError(format!(
                    "contact {field} is required"
                )));
            }
        }

        match contact.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(CommerceError::ValidationError(format!(
                    "invalid email address: {}",
                    contact.email
                )))
            }
        }

        if self.items.is_empty() {
            return Err(CommerceError::ValidationError(
                "quote has no items".to_string(),
            ));
        }

        if let Some(empty) = self.items.iter().find(|i| i.size_quantities.total() == 0) {
            return Err(CommerceError::EmptyQuantities(empty.product_id.to_string()));
        }

        Ok(())
    }

    /// Units across every submitted line.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|i| i.size_quantities.total()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> QuoteSubmission {
        serde_json::from_str(
            r##"{
                "contact": {"name": "Dana Reyes", "email": "dana@club.example", "phone": "555-0100"},
                "items": [{
                    "quoteItemId": "A-Navy",
                    "productId": "A",
                    "productName": "Performance Polo",
                    "color": {"name": "Navy", "hex": "#1f2a44"},
                    "sizeQuantities": {"M": 12, "L": 8}
                }]
            }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_submission() {
        let submission = submission();
        assert!(submission.validate().is_ok());
        assert_eq!(submission.total_units(), 20);
        assert_eq!(submission.contact.company, None);
    }

    #[test]
    fn test_missing_contact_field() {
        let mut submission = submission();
        submission.contact.phone = "  ".to_string();
        let err = submission.validate().unwrap_err();
        assert_eq!(
            err,
            CommerceError::ValidationError("contact phone is required".to_string())
        );
    }

    #[test]
    fn test_bad_email() {
        let mut submission = submission();
        submission.contact.email = "dana.example".to_string();
        assert!(submission.validate().is_err());
    }

    #[test]
    fn test_no_items() {
        let mut submission = submission();
        submission.items.clear();
        assert!(submission.validate().is_err());
    }

    #[test]
    fn test_line_without_units() {
        let mut submission = submission();
        submission.items[0].size_quantities = SizeQuantities::new().with("M", 0);
        assert!(matches!(
            submission.validate(),
            Err(CommerceError::EmptyQuantities(_))
        ));
    }
}
