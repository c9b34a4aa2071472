//! Product catalogue module.
//!
//! Contains the read-only product records served by the data API.

mod product;

pub use product::{ColorOption, Gender, Product, CUSTOM_JERSEY_CATEGORY};
