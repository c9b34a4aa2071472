//! Catalogue search module.
//!
//! Filtering, sorting and facet counting over the in-memory catalogue.
//! Every function here is pure: same inputs, same ordering.

mod facets;
mod filter;
mod sort;

pub use facets::{compute_facet_counts, FacetCount, FacetCounts};
pub use filter::FilterState;
pub use sort::SortOrder;

pub(crate) use filter::query_pairs;

use crate::catalog::Product;
use crate::error::CommerceError;
use serde::Serialize;

/// Filter then sort the catalogue without touching the input slice.
pub fn apply_filters<'a>(
    products: &'a [Product],
    filters: &FilterState,
    sort: SortOrder,
) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products.iter().filter(|p| filters.matches(p)).collect();
    sort.sort(&mut matched);
    matched
}

/// A filtered, sorted listing together with its facet counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueView<'a> {
    /// Matching products in display order.
    pub products: Vec<&'a Product>,
    /// Sidebar counts.
    pub facets: FacetCounts,
    /// Number of matching products.
    pub total: usize,
    /// Applied sort order.
    pub sort: SortOrder,
}

impl<'a> CatalogueView<'a> {
    /// Build the view for a catalogue and a validated filter state.
    pub fn build(
        products: &'a [Product],
        filters: &FilterState,
        sort: SortOrder,
    ) -> Result<Self, CommerceError> {
        filters.validate()?;
        let listed = apply_filters(products, filters, sort);
        Ok(Self {
            total: listed.len(),
            products: listed,
            facets: compute_facet_counts(products, filters),
            sort,
        })
    }

    /// Build the view from a URL query string (filters plus `sort`).
    pub fn from_query(products: &'a [Product], query: &str) -> Result<Self, CommerceError> {
        let filters = FilterState::from_query(query)?;
        let sort = query_pairs(query)?
            .into_iter()
            .find(|(key, _)| key == "sort")
            .map(|(_, value)| SortOrder::parse(&value))
            .transpose()?
            .unwrap_or_default();
        Self::build(products, &filters, sort)
    }

    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Gender;

    fn two_products() -> Vec<Product> {
        vec![
            Product::new("A", "Polo", "Apparel", "Tops", Gender::Men)
                .bestseller()
                .with_price(20.0),
            Product::new("B", "Joggers", "Apparel", "Bottoms", Gender::Women).with_price(35.0),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_group_with_price_desc_then_bestsellers() {
        let products = two_products();
        let mut filters = FilterState::new();
        filters.select_group(Some("Apparel".to_string())).unwrap();

        let listed = apply_filters(&products, &filters, SortOrder::PriceDesc);
        assert_eq!(ids(&listed), ["B", "A"]);

        filters.set_bestsellers_only(true);
        let listed = apply_filters(&products, &filters, SortOrder::PriceDesc);
        assert_eq!(ids(&listed), ["A"]);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let products = two_products();
        let filters = FilterState::new();
        let first = apply_filters(&products, &filters, SortOrder::NameAsc);
        let second = apply_filters(&products, &filters, SortOrder::NameAsc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_gender_toggle_round_trip() {
        let products = two_products();
        let mut filters = FilterState::new();
        let before = ids(&apply_filters(&products, &filters, SortOrder::Default));

        filters.toggle_gender(Gender::Men);
        assert_eq!(ids(&apply_filters(&products, &filters, SortOrder::Default)), ["A"]);

        filters.toggle_gender(Gender::Men);
        assert_eq!(ids(&apply_filters(&products, &filters, SortOrder::Default)), before);
    }

    #[test]
    fn test_input_slice_untouched() {
        let products = two_products();
        let snapshot = products.clone();
        let _ = apply_filters(&products, &FilterState::new(), SortOrder::PriceDesc);
        assert_eq!(products, snapshot);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let products = two_products();
        let mut filters = FilterState::new();
        filters.select_group(Some("Headwear".to_string())).unwrap();

        let view = CatalogueView::build(&products, &filters, SortOrder::Default).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.total, 0);
    }

    #[test]
    fn test_view_from_query() {
        let products = two_products();
        let view = CatalogueView::from_query(&products, "group=Apparel&sort=price-asc").unwrap();

        assert_eq!(ids(&view.products), ["A", "B"]);
        assert_eq!(view.sort, SortOrder::PriceAsc);
        assert_eq!(view.facets.categories.len(), 2);
    }

    #[test]
    fn test_uncategorised_products_are_hidden() {
        let mut products = two_products();
        products.push(Product::new("C", "Draft Tee", "Apparel", " ", Gender::Men).bestseller());
        products.push(Product::new("D", "Sample", "", "Tops", Gender::Men));

        let view = CatalogueView::build(&products, &FilterState::new(), SortOrder::Default).unwrap();
        assert_eq!(ids(&view.products), ["A", "B"]);
        assert_eq!(view.facets.group("Apparel").unwrap().count, 2);
        assert_eq!(view.facets.gender(Gender::Men).unwrap().count, 1);
        assert_eq!(view.facets.bestsellers, 1);
    }

    #[test]
    fn test_view_from_query_rejects_unknown_sort() {
        let products = two_products();
        let err = CatalogueView::from_query(&products, "sort=popular").unwrap_err();
        assert_eq!(err, CommerceError::UnknownSortOrder("popular".to_string()));
    }
}
