//! Commerce error types.

use thiserror::Error;

/// Errors raised by the catalogue and quote logic.
///
/// Every variant is a precondition violation: the caller built a request the
/// domain cannot accept. An empty result set is never an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Filter state violates its own invariants.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Sort order string not recognised.
    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),

    /// Gender string not recognised.
    #[error("Unknown gender: {0}")]
    UnknownGender(String),

    /// Product cannot be quoted (e.g. it offers no colors).
    #[error("Product not orderable: {0}")]
    ProductNotOrderable(String),

    /// Color not offered by the product.
    #[error("Color {color} is not available for product {product_id}")]
    UnknownColor { product_id: String, color: String },

    /// Size quantities sum to zero.
    #[error("Quote line for {0} has no units")]
    EmptyQuantities(String),

    /// Quantity arithmetic overflowed while merging lines.
    #[error("Quantity overflow while merging size {0}")]
    Overflow(String),

    /// Submission failed validation.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CommerceError::UnknownColor {
            product_id: "tee-01".to_string(),
            color: "Teal".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Color Teal is not available for product tee-01"
        );
    }
}
