//! CLI command implementations.

pub mod catalogue;
pub mod config;
pub mod facets;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use threadline_commerce::{FilterState, Gender};

/// Filter selection shared by `catalogue` and `facets`.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Collection to restrict to (e.g., "Apparel").
    #[arg(short, long)]
    pub group: Option<String>,

    /// Category within the group; repeatable.
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Men, Women or Unisex; repeatable.
    #[arg(long = "gender")]
    pub genders: Vec<String>,

    /// Only bestsellers.
    #[arg(short, long)]
    pub bestsellers: bool,
}

impl FilterArgs {
    /// Build the filter state, applying selections in UI order.
    pub fn to_filter_state(&self) -> Result<FilterState> {
        let mut state = FilterState::new();
        state.select_group(self.group.clone())?;
        for category in &self.categories {
            if !state.categories().contains(category) {
                state.toggle_category(category.clone())?;
            }
        }
        for label in &self.genders {
            let gender =
                Gender::parse(label).ok_or_else(|| anyhow!("Unknown gender: {}", label))?;
            if !state.genders().contains(&gender) {
                state.toggle_gender(gender);
            }
        }
        state.set_bestsellers_only(self.bestsellers);
        Ok(state)
    }
}

/// Arguments for the catalogue command.
#[derive(Args)]
pub struct CatalogueArgs {
    /// Products JSON file (the `products` value of the data API).
    pub file: String,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// default, name-asc, price-asc or price-desc.
    #[arg(short, long, default_value = "default")]
    pub sort: String,

    /// Show at most N products.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Products JSON file.
    pub file: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a starter threadline.toml in the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Check the configuration for errors and warnings.
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_to_state() {
        let args = FilterArgs {
            group: Some("Apparel".to_string()),
            categories: vec!["Tops".to_string(), "Tops".to_string()],
            genders: vec!["women".to_string()],
            bestsellers: true,
        };
        let state = args.to_filter_state().unwrap();

        assert_eq!(state.group(), Some("Apparel"));
        assert_eq!(state.categories().len(), 1);
        assert!(state.genders().contains(&Gender::Women));
        assert!(state.bestsellers_only());
    }

    #[test]
    fn test_category_without_group_fails() {
        let args = FilterArgs {
            categories: vec!["Tops".to_string()],
            ..FilterArgs::default()
        };
        assert!(args.to_filter_state().is_err());
    }

    #[test]
    fn test_unknown_gender_fails() {
        let args = FilterArgs {
            genders: vec!["kids".to_string()],
            ..FilterArgs::default()
        };
        let err = args.to_filter_state().unwrap_err();
        assert_eq!(err.to_string(), "Unknown gender: kids");
    }
}
