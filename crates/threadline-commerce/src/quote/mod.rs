//! Quote request module.
//!
//! Contains quote line items, the merge rules for repeated adds, the
//! caller-owned quote list and the submission payload.

mod aggregate;
mod item;
mod list;
mod submission;

pub use aggregate::{add_item, clear, remove_item, AddToQuote};
pub use item::{Attachments, Customization, FileHandle, QuoteItem, QuoteKey, SizeQuantities};
pub use list::{QuoteAction, QuoteList};
pub use submission::{ContactDetails, QuoteSubmission, SubmittedQuoteItem};
