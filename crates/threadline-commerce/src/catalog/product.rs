//! Product and color types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Category whose personalized items are never merged into one quote line.
pub const CUSTOM_JERSEY_CATEGORY: &str = "Custom Jerseys";

/// Target gender of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

impl Gender {
    /// Every gender, in display order.
    pub const ALL: [Gender; 3] = [Gender::Men, Gender::Women, Gender::Unisex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
            Gender::Unisex => "Unisex",
        }
    }

    /// Parse a gender label, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "men" => Some(Gender::Men),
            "women" => Some(Gender::Women),
            "unisex" => Some(Gender::Unisex),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A color a product can be ordered in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorOption {
    /// Display name (e.g., "Navy").
    pub name: String,
    /// CSS hex value (e.g., "#1f2a44").
    pub hex: String,
}

impl ColorOption {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }
}

/// A product in the catalogue.
///
/// Products are owned by the data API; this crate only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Category within the group (e.g., "Tops").
    pub category: String,
    /// Top-level collection (e.g., "Apparel").
    pub category_group: String,
    /// Target gender.
    pub gender: Gender,
    /// Whether the product is flagged as a bestseller.
    #[serde(default)]
    pub is_bestseller: bool,
    /// Manual position in the default listing. Missing sorts last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<f64>,
    /// Indicative unit price. Missing or zero means "price on request".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Colors the product can be ordered in.
    #[serde(default)]
    pub available_colors: Vec<ColorOption>,
    /// Image URLs keyed by color name.
    #[serde(default)]
    pub image_urls: BTreeMap<String, Vec<String>>,
    /// Marketing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Create a product with the fields the filter engine needs.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category_group: impl Into<String>,
        category: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            category_group: category_group.into(),
            gender,
            is_bestseller: false,
            display_order: None,
            price: None,
            available_colors: Vec::new(),
            image_urls: BTreeMap::new(),
            description: None,
        }
    }

    /// Set the unit price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the manual display position.
    pub fn with_display_order(mut self, order: f64) -> Self {
        self.display_order = Some(order);
        self
    }

    /// Flag the product as a bestseller.
    pub fn bestseller(mut self) -> Self {
        self.is_bestseller = true;
        self
    }

    /// Add an orderable color.
    pub fn with_color(mut self, name: impl Into<String>, hex: impl Into<String>) -> Self {
        self.available_colors.push(ColorOption::new(name, hex));
        self
    }

    /// Check if the product may appear in the catalogue.
    pub fn is_catalogue_visible(&self) -> bool {
        !self.category.trim().is_empty() && !self.category_group.trim().is_empty()
    }

    /// Check if the product can be added to a quote.
    pub fn is_orderable(&self) -> bool {
        !self.available_colors.is_empty()
    }

    /// Check if this product takes per-player customizations.
    pub fn is_custom_jersey(&self) -> bool {
        self.category == CUSTOM_JERSEY_CATEGORY
    }

    /// Find an offered color by name.
    pub fn color(&self, name: &str) -> Option<&ColorOption> {
        self.available_colors.iter().find(|c| c.name == name)
    }

    /// Price with "missing" and zero collapsed to `None`.
    pub fn listed_price(&self) -> Option<f64> {
        self.price.filter(|p| *p != 0.0 && !p.is_nan())
    }
}
