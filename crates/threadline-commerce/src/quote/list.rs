//! Caller-owned quote list state.

use crate::error::CommerceError;
use crate::ids::QuoteItemId;
use crate::quote::{add_item, clear, remove_item, AddToQuote, QuoteItem, SubmittedQuoteItem};
use serde::{Deserialize, Serialize};

/// A change to the quote list.
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteAction {
    Add(AddToQuote),
    Remove(QuoteItemId),
    /// Only issued after a confirmed successful submission.
    Clear,
}

/// The working set of lines a visitor wants quoted.
///
/// `apply` never mutates `self`; it returns the next state. The caller owns
/// the value and decides where (if anywhere) it is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteList {
    items: Vec<QuoteItem>,
}

impl QuoteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the state that follows `action`.
    pub fn apply(&self, action: QuoteAction) -> Result<QuoteList, CommerceError> {
        let items = match action {
            QuoteAction::Add(request) => add_item(&self.items, request)?,
            QuoteAction::Remove(id) => remove_item(&self.items, &id),
            QuoteAction::Clear => clear(&self.items),
        };
        Ok(QuoteList { items })
    }

    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }

    pub fn get(&self, id: &QuoteItemId) -> Option<&QuoteItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Units across every line and size.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(QuoteItem::total_units).sum()
    }

    /// Serializable projection for the submission endpoint (no file blobs).
    pub fn to_submission_items(&self) -> Vec<SubmittedQuoteItem> {
        self.items.iter().map(SubmittedQuoteItem::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColorOption, Gender, Product};

    fn hoodie() -> Product {
        Product::new("hood-2", "Heavy Hoodie", "Apparel", "Outerwear", Gender::Unisex)
            .with_color("Grey", "#888888")
    }

    fn add(sizes: &[(&str, u32)]) -> QuoteAction {
        let mut request = AddToQuote::new(hoodie(), ColorOption::new("Grey", "#888888"));
        for (size, qty) in sizes {
            request = request.with_size(*size, *qty);
        }
        QuoteAction::Add(request)
    }

    #[test]
    fn test_apply_returns_new_state() {
        let empty = QuoteList::new();
        let one = empty.apply(add(&[("M", 10)])).unwrap();

        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(one.total_units(), 10);
    }

    #[test]
    fn test_merge_remove_clear_flow() {
        let list = QuoteList::new()
            .apply(add(&[("M", 10)]))
            .unwrap()
            .apply(add(&[("M", 2), ("L", 6)]))
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.total_units(), 18);

        let id = list.items()[0].id().clone();
        assert!(list.get(&id).is_some());

        let unchanged = list.apply(QuoteAction::Remove(QuoteItemId::new("missing"))).unwrap();
        assert_eq!(unchanged, list);

        let removed = list.apply(QuoteAction::Remove(id)).unwrap();
        assert!(removed.is_empty());

        let cleared = list.apply(QuoteAction::Clear).unwrap();
        assert!(cleared.is_empty());
    }

    #[test]
    fn test_failed_action_keeps_previous_state() {
        let list = QuoteList::new().apply(add(&[("S", 1)])).unwrap();
        assert!(list.apply(add(&[("S", 0)])).is_err());
        assert_eq!(list.total_units(), 1);
    }

    #[test]
    fn test_list_round_trips_through_json() {
        let list = QuoteList::new().apply(add(&[("XL", 3)])).unwrap();
        let json = serde_json::to_string(&list).unwrap();
        let restored: QuoteList = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, list);
    }

    #[test]
    fn test_submission_projection() {
        let list = QuoteList::new().apply(add(&[("XL", 3)])).unwrap();
        let items = list.to_submission_items();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_name, "Heavy Hoodie");
        assert_eq!(items[0].total_units, 3);
        assert!(!items[0].has_logo);
    }
}
