//! Catalogue filter state.

use crate::catalog::{Gender, Product};
use crate::error::CommerceError;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One independently filterable dimension of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Dimension {
    Group,
    Category,
    Gender,
    Bestseller,
}

/// The user's current catalogue selections.
///
/// Facets combine with AND; an empty facet places no constraint. Categories
/// only have meaning inside a group, so selecting a group always clears them
/// and a category can never be selected without a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFilterState")]
pub struct FilterState {
    group: Option<String>,
    category: BTreeSet<String>,
    gender: BTreeSet<Gender>,
    bestsellers_only: bool,
}

/// Unchecked wire form, validated on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFilterState {
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    category: BTreeSet<String>,
    #[serde(default)]
    gender: BTreeSet<Gender>,
    #[serde(default)]
    bestsellers_only: bool,
}

impl TryFrom<RawFilterState> for FilterState {
    type Error = CommerceError;

    fn try_from(raw: RawFilterState) -> Result<Self, Self::Error> {
        let state = FilterState {
            group: raw.group,
            category: raw.category,
            gender: raw.gender,
            bestsellers_only: raw.bestsellers_only,
        };
        state.validate()?;
        Ok(state)
    }
}

impl FilterState {
    /// Create an empty filter state (matches every product).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.category
    }

    pub fn genders(&self) -> &BTreeSet<Gender> {
        &self.gender
    }

    pub fn bestsellers_only(&self) -> bool {
        self.bestsellers_only
    }

    /// Select a group (or none), clearing any category selection.
    pub fn select_group(&mut self, group: Option<String>) -> Result<(), CommerceError> {
        if let Some(g) = &group {
            if g.trim().is_empty() {
                return Err(CommerceError::InvalidFilter(
                    "group must not be empty".to_string(),
                ));
            }
        }
        self.group = group;
        self.category.clear();
        Ok(())
    }

    /// Toggle a category within the selected group.
    ///
    /// Returns whether the category is selected afterwards.
    pub fn toggle_category(&mut self, category: impl Into<String>) -> Result<bool, CommerceError> {
        let category = category.into();
        if self.group.is_none() {
            return Err(CommerceError::InvalidFilter(format!(
                "category {category} selected without a group"
            )));
        }
        if self.category.remove(&category) {
            Ok(false)
        } else {
            self.category.insert(category);
            Ok(true)
        }
    }

    /// Toggle a gender. Returns whether it is selected afterwards.
    pub fn toggle_gender(&mut self, gender: Gender) -> bool {
        if self.gender.remove(&gender) {
            false
        } else {
            self.gender.insert(gender);
            true
        }
    }

    pub fn set_bestsellers_only(&mut self, enabled: bool) {
        self.bestsellers_only = enabled;
    }

    /// Reset every facet in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check if no facet is active.
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of active selections across all facets.
    pub fn active_count(&self) -> usize {
        usize::from(self.group.is_some())
            + self.category.len()
            + self.gender.len()
            + usize::from(self.bestsellers_only)
    }

    /// Check the cross-field invariants.
    pub fn validate(&self) -> Result<(), CommerceError> {
        match &self.group {
            Some(g) if g.trim().is_empty() => Err(CommerceError::InvalidFilter(
                "group must not be empty".to_string(),
            )),
            None if !self.category.is_empty() => Err(CommerceError::InvalidFilter(
                "categories require a selected group".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Check a product against every active facet.
    ///
    /// Products without a category or group never appear in the catalogue.
    pub fn matches(&self, product: &Product) -> bool {
        product.is_catalogue_visible()
            && self.group_matches(product)
            && self.category_matches(product)
            && self.gender_matches(product)
            && self.bestseller_matches(product)
    }

    /// Check a product against every facet except `ignore`.
    ///
    /// Ignoring the group also ignores categories, which are scoped to it.
    pub(crate) fn matches_ignoring(&self, product: &Product, ignore: Dimension) -> bool {
        product.is_catalogue_visible()
            && (ignore == Dimension::Group || self.group_matches(product))
            && (matches!(ignore, Dimension::Group | Dimension::Category)
                || self.category_matches(product))
            && (ignore == Dimension::Gender || self.gender_matches(product))
            && (ignore == Dimension::Bestseller || self.bestseller_matches(product))
    }

    fn group_matches(&self, product: &Product) -> bool {
        self.group
            .as_deref()
            .map_or(true, |g| product.category_group == g)
    }

    fn category_matches(&self, product: &Product) -> bool {
        self.category.is_empty() || self.category.contains(&product.category)
    }

    fn gender_matches(&self, product: &Product) -> bool {
        self.gender.is_empty() || self.gender.contains(&product.gender)
    }

    fn bestseller_matches(&self, product: &Product) -> bool {
        !self.bestsellers_only || product.is_bestseller
    }

    /// Parse a navigation filter from a URL query string.
    ///
    /// Recognised keys are `group`, `category`, `gender` and `bestsellers`;
    /// `category` and `gender` may repeat or hold comma-separated values.
    /// Other keys (such as `sort`) are ignored.
    pub fn from_query(query: &str) -> Result<Self, CommerceError> {
        let mut group = None;
        let mut categories = Vec::new();
        let mut state = FilterState::new();

        for (key, value) in query_pairs(query)? {
            match key.as_str() {
                "group" if !value.is_empty() => group = Some(value),
                "category" => categories.extend(split_list(&value)),
                "gender" => {
                    for label in split_list(&value) {
                        let gender = Gender::parse(&label)
                            .ok_or_else(|| CommerceError::UnknownGender(label.clone()))?;
                        state.gender.insert(gender);
                    }
                }
                "bestsellers" => state.bestsellers_only = parse_flag(&value)?,
                _ => {}
            }
        }

        state.select_group(group)?;
        for category in categories {
            if !state.category.contains(&category) {
                state.toggle_category(category)?;
            }
        }
        Ok(state)
    }
}

/// Decode `key=value` pairs, treating `+` as a space.
pub(crate) fn query_pairs(query: &str) -> Result<Vec<(String, String)>, CommerceError> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Result<String, CommerceError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| CommerceError::InvalidFilter(format!("invalid UTF-8 in query: {raw}")))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(value: &str) -> Result<bool, CommerceError> {
    match value.to_lowercase().as_str() {
        "" | "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(CommerceError::InvalidFilter(format!(
            "bestsellers flag must be true or false, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selecting_group_resets_categories() {
        let mut filters = FilterState::new();
        filters.select_group(Some("Apparel".to_string())).unwrap();
        filters.toggle_category("Tops").unwrap();
        filters.toggle_gender(Gender::Women);

        filters.select_group(Some("Headwear".to_string())).unwrap();

        assert_eq!(filters.group(), Some("Headwear"));
        assert!(filters.categories().is_empty());
        assert!(filters.genders().contains(&Gender::Women));
    }

    #[test]
    fn test_category_requires_group() {
        let mut filters = FilterState::new();
        let err = filters.toggle_category("Tops").unwrap_err();
        assert!(matches!(err, CommerceError::InvalidFilter(_)));
    }

    #[test]
    fn test_empty_group_rejected() {
        let mut filters = FilterState::new();
        assert!(filters.select_group(Some("  ".to_string())).is_err());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut filters = FilterState::new();
        let before = filters.clone();
        assert!(filters.toggle_gender(Gender::Men));
        assert!(!filters.toggle_gender(Gender::Men));
        assert_eq!(filters, before);
    }

    #[test]
    fn test_active_count_and_clear() {
        let mut filters = FilterState::new();
        filters.select_group(Some("Apparel".to_string())).unwrap();
        filters.toggle_category("Tops").unwrap();
        filters.toggle_category("Bottoms").unwrap();
        filters.set_bestsellers_only(true);
        assert_eq!(filters.active_count(), 4);

        filters.clear();
        assert!(filters.is_empty());
    }

    #[test]
    fn test_from_query() {
        let filters = FilterState::from_query(
            "?category=Tops&group=Team+Apparel&gender=men,Women&bestsellers=true&sort=price-asc",
        )
        .unwrap();

        assert_eq!(filters.group(), Some("Team Apparel"));
        assert!(filters.categories().contains("Tops"));
        assert_eq!(filters.genders().len(), 2);
        assert!(filters.bestsellers_only());
    }

    #[test]
    fn test_from_query_percent_decoding() {
        let filters = FilterState::from_query("group=Head%20wear").unwrap();
        assert_eq!(filters.group(), Some("Head wear"));
    }

    #[test]
    fn test_from_query_rejects_orphan_category() {
        assert!(FilterState::from_query("category=Tops").is_err());
        assert!(FilterState::from_query("gender=kids").is_err());
        assert!(FilterState::from_query("bestsellers=maybe").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: FilterState =
            serde_json::from_str(r#"{"group":"Apparel","category":["Tops"],"gender":["Men"]}"#)
                .unwrap();
        assert_eq!(ok.categories().len(), 1);

        let bad = serde_json::from_str::<FilterState>(r#"{"category":["Tops"]}"#);
        assert!(bad.is_err());
    }
}
