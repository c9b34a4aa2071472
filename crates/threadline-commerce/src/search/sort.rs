//! Catalogue sort orders.

use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sort options for the catalogue listing. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Ascending manual display order.
    #[default]
    Default,
    /// Name A-Z.
    NameAsc,
    /// Price, low to high. Unpriced products last.
    PriceAsc,
    /// Price, high to low. Unpriced products last.
    PriceDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Default => "default",
            SortOrder::NameAsc => "name-asc",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOrder::Default => "Featured",
            SortOrder::NameAsc => "Name: A-Z",
            SortOrder::PriceAsc => "Price: Low to High",
            SortOrder::PriceDesc => "Price: High to Low",
        }
    }

    /// Parse a sort key as used in URLs.
    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        match s {
            "" | "default" => Ok(SortOrder::Default),
            "name-asc" => Ok(SortOrder::NameAsc),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            other => Err(CommerceError::UnknownSortOrder(other.to_string())),
        }
    }

    /// Compare two products under this order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::Default => compare_positions(a, b),
            SortOrder::NameAsc => compare_names(&a.name, &b.name),
            SortOrder::PriceAsc => {
                let pa = a.listed_price().unwrap_or(f64::INFINITY);
                let pb = b.listed_price().unwrap_or(f64::INFINITY);
                pa.total_cmp(&pb)
            }
            SortOrder::PriceDesc => {
                let pa = a.listed_price().unwrap_or(0.0);
                let pb = b.listed_price().unwrap_or(0.0);
                pb.total_cmp(&pa)
            }
        }
    }

    /// Stable sort: products that compare equal keep their input order.
    pub fn sort(&self, products: &mut [&Product]) {
        products.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Missing (or NaN) display order sorts after every explicit position.
fn compare_positions(a: &Product, b: &Product) -> Ordering {
    let position = |p: &Product| p.display_order.filter(|order| !order.is_nan());
    match (position(a), position(b)) {
        (Some(pa), Some(pb)) => pa.total_cmp(&pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive name order with exact order as tiebreaker.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Gender;

    fn product(id: &str, name: &str) -> Product {
        Product::new(id, name, "Apparel", "Tops", Gender::Unisex)
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_parse_round_trip() {
        for order in [
            SortOrder::Default,
            SortOrder::NameAsc,
            SortOrder::PriceAsc,
            SortOrder::PriceDesc,
        ] {
            assert_eq!(SortOrder::parse(order.as_str()).unwrap(), order);
        }
        assert!(SortOrder::parse("newest").is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&SortOrder::PriceDesc).unwrap();
        assert_eq!(json, r#""price-desc""#);
    }

    #[test]
    fn test_default_order_is_stable() {
        let a = product("a", "A").with_display_order(2.0);
        let b = product("b", "B").with_display_order(1.0);
        let c = product("c", "C").with_display_order(2.0);
        let d = product("d", "D");

        let mut list = vec![&d, &a, &b, &c];
        SortOrder::Default.sort(&mut list);
        assert_eq!(ids(&list), ["b", "a", "c", "d"]);
    }

    #[test]
    fn test_default_order_with_fractional_positions() {
        let a = product("a", "A").with_display_order(2.0);
        let b = product("b", "B").with_display_order(1.5);
        let c = product("c", "C").with_display_order(f64::NAN);
        let d = product("d", "D").with_display_order(-0.5);

        let mut list = vec![&a, &b, &c, &d];
        SortOrder::Default.sort(&mut list);
        assert_eq!(ids(&list), ["d", "b", "a", "c"]);
    }

    #[test]
    fn test_name_order_ignores_case() {
        let a = product("a", "zip hoodie");
        let b = product("b", "Beanie");
        let c = product("c", "apron");

        let mut list = vec![&a, &b, &c];
        SortOrder::NameAsc.sort(&mut list);
        assert_eq!(ids(&list), ["c", "b", "a"]);
    }

    #[test]
    fn test_price_asc_puts_unpriced_last() {
        let a = product("a", "A").with_price(30.0);
        let b = product("b", "B");
        let c = product("c", "C").with_price(0.0);
        let d = product("d", "D").with_price(10.0);

        let mut list = vec![&a, &b, &c, &d];
        SortOrder::PriceAsc.sort(&mut list);
        assert_eq!(ids(&list), ["d", "a", "b", "c"]);
    }

    #[test]
    fn test_price_desc_puts_unpriced_last() {
        let a = product("a", "A").with_price(30.0);
        let b = product("b", "B");
        let c = product("c", "C").with_price(45.0);

        let mut list = vec![&b, &a, &c];
        SortOrder::PriceDesc.sort(&mut list);
        assert_eq!(ids(&list), ["c", "a", "b"]);
    }
}
