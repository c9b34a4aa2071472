//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use threadline_api::config::CONFIG_FILE_NAMES;
use threadline_api::ApiConfig;
use threadline_commerce::Product;

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration (file plus environment overrides).
    pub config: ApiConfig,
    /// Where the config came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve(&cwd, path)),
            None => find_config(&cwd),
        };

        let config = match &config_path {
            Some(path) => {
                output.debug(&format!("Using config {}", path.display()));
                ApiConfig::load(path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?
            }
            None => {
                output.debug("No config file found, using defaults");
                ApiConfig::default()
            }
        };

        Ok(Self {
            config: config.with_env_overrides(),
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }

    /// Read a products JSON array.
    pub fn load_products(&self, path: &str) -> Result<Vec<Product>> {
        let path = self.resolve_path(path);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read products file: {}", path.display()))?;
        let products: Vec<Product> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse products file: {}", path.display()))?;
        self.output
            .debug(&format!("Loaded {} products from {}", products.len(), path.display()));
        Ok(products)
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Nearest config file walking up from `start`.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "threadline-cli-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = scratch_dir("walk");
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("threadline.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.join("threadline.toml")));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_resolve() {
        let cwd = PathBuf::from("/srv/shop");
        assert_eq!(resolve(&cwd, "products.json"), cwd.join("products.json"));
        assert_eq!(resolve(&cwd, "/tmp/p.json"), PathBuf::from("/tmp/p.json"));
    }
}
