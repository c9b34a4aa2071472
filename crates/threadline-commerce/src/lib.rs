//! Catalogue and quote domain logic for the Threadline apparel storefront.
//!
//! This crate is pure in-memory computation with no I/O:
//!
//! - **Catalog**: Products, colors, genders as served by the data API
//! - **Search**: Filter state, sort orders, facet counts, the catalogue view
//! - **Quote**: Quote line items, merge keys, the quote list reducer and
//!   the serializable submission projection
//!
//! # Example
//!
//! ```rust,ignore
//! use threadline_commerce::prelude::*;
//!
//! let mut filters = FilterState::new();
//! filters.select_group(Some("Apparel".to_string()))?;
//! filters.toggle_gender(Gender::Men);
//!
//! let visible = apply_filters(&products, &filters, SortOrder::PriceAsc);
//! let counts = compute_facet_counts(&products, &filters);
//!
//! let quote = QuoteList::new().apply(QuoteAction::Add(
//!     AddToQuote::new(visible[0].clone(), visible[0].available_colors[0].clone())
//!         .with_size("M", 12),
//! ))?;
//! println!("{} units", quote.total_units());
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod quote;
pub mod search;

pub use catalog::*;
pub use error::CommerceError;
pub use ids::*;
pub use quote::*;
pub use search::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{ColorOption, Gender, Product};

    // Search
    pub use crate::search::{
        apply_filters, compute_facet_counts, CatalogueView, FacetCount, FacetCounts,
        FilterState, SortOrder,
    };

    // Quote
    pub use crate::quote::{
        add_item, clear, remove_item, AddToQuote, Attachments, ContactDetails, Customization,
        FileHandle, QuoteAction, QuoteItem, QuoteKey, QuoteList, QuoteSubmission,
        SizeQuantities, SubmittedQuoteItem,
    };
}
