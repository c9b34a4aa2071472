//! Pure quote-list operations.
//!
//! Each function takes the current lines by reference and returns a fresh
//! list, so callers can detect changes by comparing the old and new lists.

use crate::catalog::{ColorOption, Product};
use crate::error::CommerceError;
use crate::ids::QuoteItemId;
use crate::quote::{Attachments, Customization, FileHandle, QuoteItem, QuoteKey, SizeQuantities};

/// An "add to quote" request.
#[derive(Debug, Clone, PartialEq)]
pub struct AddToQuote {
    pub product: Product,
    pub color: ColorOption,
    pub sizes: SizeQuantities,
    pub attachments: Attachments,
    pub customizations: Vec<Customization>,
}

impl AddToQuote {
    pub fn new(product: Product, color: ColorOption) -> Self {
        Self {
            product,
            color,
            sizes: SizeQuantities::new(),
            attachments: Attachments::default(),
            customizations: Vec::new(),
        }
    }

    pub fn with_size(mut self, size: impl Into<String>, quantity: u32) -> Self {
        self.sizes.insert(size, quantity);
        self
    }

    pub fn with_sizes(mut self, sizes: SizeQuantities) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_logo(mut self, file: FileHandle) -> Self {
        self.attachments.logo_file = Some(file);
        self
    }

    pub fn with_design(mut self, file: FileHandle) -> Self {
        self.attachments.design_file = Some(file);
        self
    }

    pub fn with_customizations(mut self, customizations: Vec<Customization>) -> Self {
        self.customizations = customizations;
        self
    }

    /// Personalized jerseys are kept as separate lines.
    pub fn is_customized(&self) -> bool {
        self.product.is_custom_jersey() && !self.customizations.is_empty()
    }

    fn key(&self) -> QuoteKey {
        if self.is_customized() {
            QuoteKey::unique(self.product.id.clone(), &self.color.name)
        } else {
            QuoteKey::mergeable(self.product.id.clone(), &self.color.name)
        }
    }
}

/// Add a line, merging into an existing line with the same product and color.
///
/// Zero-quantity sizes are dropped; a request with no units left is rejected
/// rather than creating an empty line.
pub fn add_item(items: &[QuoteItem], request: AddToQuote) -> Result<Vec<QuoteItem>, CommerceError> {
    let product_id = request.product.id.to_string();
    if !request.product.is_orderable() {
        return Err(CommerceError::ProductNotOrderable(product_id));
    }
    // Lines carry the product's own swatch.
    let color = match request.product.color(&request.color.name) {
        Some(offered) => offered.clone(),
        None => {
            return Err(CommerceError::UnknownColor {
                product_id,
                color: request.color.name,
            })
        }
    };

    let sizes = request.sizes.without_zeros();
    if sizes.total() == 0 {
        return Err(CommerceError::EmptyQuantities(product_id));
    }

    let key = request.key();
    let mut next = items.to_vec();

    if key.is_mergeable() {
        if let Some(existing) = next.iter_mut().find(|item| item.key() == &key) {
            existing.size_quantities = existing.size_quantities.merged(&sizes)?;
            existing.attachments = existing.attachments.overlay(&request.attachments);
            return Ok(next);
        }
    }

    next.push(QuoteItem::new(
        key,
        request.product,
        color,
        sizes,
        request.attachments,
        request.customizations,
    ));
    Ok(next)
}

/// Drop the line with `id`. Unknown IDs leave the list unchanged.
pub fn remove_item(items: &[QuoteItem], id: &QuoteItemId) -> Vec<QuoteItem> {
    items.iter().filter(|item| item.id() != id).cloned().collect()
}

/// Empty the list, regardless of its contents.
pub fn clear(_items: &[QuoteItem]) -> Vec<QuoteItem> {
    Vec::new()
}
