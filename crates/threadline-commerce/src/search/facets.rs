//! Facet counts for the filter sidebar.

use crate::catalog::{Gender, Product};
use crate::search::filter::{Dimension, FilterState};
use serde::{Deserialize, Serialize};

/// A single facet option with its prospective result count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    /// The option label.
    pub value: String,
    /// Products matching every other active facet plus this option.
    pub count: usize,
    /// Whether the option is currently selected.
    pub selected: bool,
}

/// Counts for every facet dimension.
///
/// Zero counts are kept so the sidebar can render disabled options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCounts {
    pub groups: Vec<FacetCount>,
    /// Only populated while a group is selected.
    pub categories: Vec<FacetCount>,
    pub genders: Vec<FacetCount>,
    /// Bestsellers among products matching every other facet.
    pub bestsellers: usize,
}

impl FacetCounts {
    pub fn group(&self, value: &str) -> Option<&FacetCount> {
        self.groups.iter().find(|f| f.value == value)
    }

    pub fn category(&self, value: &str) -> Option<&FacetCount> {
        self.categories.iter().find(|f| f.value == value)
    }

    pub fn gender(&self, gender: Gender) -> Option<&FacetCount> {
        self.genders.iter().find(|f| f.value == gender.as_str())
    }
}

/// Compute per-option counts, each ignoring its own dimension's selection.
///
/// Groups and categories are listed in order of first appearance in
/// `products`; genders are always listed in full.
pub fn compute_facet_counts(products: &[Product], filters: &FilterState) -> FacetCounts {
    let groups = distinct(products.iter().map(|p| p.category_group.as_str()))
        .into_iter()
        .map(|group| FacetCount {
            count: products
                .iter()
                .filter(|p| p.category_group == group)
                .filter(|p| filters.matches_ignoring(p, Dimension::Group))
                .count(),
            selected: filters.group() == Some(group),
            value: group.to_string(),
        })
        .collect();

    let categories = match filters.group() {
        Some(selected_group) => {
            let in_group: Vec<&Product> = products
                .iter()
                .filter(|p| p.category_group == selected_group)
                .collect();
            distinct(in_group.iter().map(|p| p.category.as_str()))
                .into_iter()
                .map(|category| FacetCount {
                    count: in_group
                        .iter()
                        .filter(|p| p.category == category)
                        .filter(|p| filters.matches_ignoring(p, Dimension::Category))
                        .count(),
                    selected: filters.categories().contains(category),
                    value: category.to_string(),
                })
                .collect()
        }
        None => Vec::new(),
    };

    let genders = Gender::ALL
        .iter()
        .map(|gender| FacetCount {
            value: gender.as_str().to_string(),
            count: products
                .iter()
                .filter(|p| p.gender == *gender)
                .filter(|p| filters.matches_ignoring(p, Dimension::Gender))
                .count(),
            selected: filters.genders().contains(gender),
        })
        .collect();

    let bestsellers = products
        .iter()
        .filter(|p| p.is_bestseller)
        .filter(|p| filters.matches_ignoring(p, Dimension::Bestseller))
        .count();

    FacetCounts {
        groups,
        categories,
        genders,
        bestsellers,
    }
}

/// Non-empty values in first-appearance order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !value.trim().is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
