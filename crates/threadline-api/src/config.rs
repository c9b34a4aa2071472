//! API configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use threadline_observability::{LogFormat, LogLevel};

use crate::ApiError;

/// Environment variable overriding the admin username.
pub const ENV_ADMIN_USERNAME: &str = "THREADLINE_ADMIN_USERNAME";
/// Environment variable overriding the admin password.
pub const ENV_ADMIN_PASSWORD: &str = "THREADLINE_ADMIN_PASSWORD";

/// File names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["threadline.toml", ".threadline.toml", "threadline.json"];

/// Configuration for the API component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ApiConfig {
    /// Load config from a file; `.json` files are JSON, everything else TOML.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ApiError> {
        toml::from_str(content).map_err(|e| ApiError::Config(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self, ApiError> {
        serde_json::from_str(content).map_err(|e| ApiError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self).map_err(|e| ApiError::Config(e.to_string()))
    }

    /// Apply `THREADLINE_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(username) = lookup(ENV_ADMIN_USERNAME) {
            self.admin.username = username;
        }
        if let Some(password) = lookup(ENV_ADMIN_PASSWORD) {
            self.admin.password = password;
        }
        self
    }

    /// Problems that make the config unusable.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.admin.username.trim().is_empty() {
            errors.push("admin.username must not be empty".to_string());
        }
        if self.store.name.trim().is_empty() {
            errors.push("store.name must not be empty".to_string());
        }
        if self.session.ttl_secs <= 0 {
            errors.push("session.ttl_secs must be positive".to_string());
        }

        errors
    }

    /// Settings that work but are probably a mistake.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.admin.password.is_empty() {
            warnings.push(format!(
                "admin.password is empty; admin login is disabled until it or {} is set",
                ENV_ADMIN_PASSWORD
            ));
        }
        if self.http.products_cache_control.trim().is_empty() {
            warnings.push(
                "http.products_cache_control is empty; product lists will not be cached"
                    .to_string(),
            );
        }

        warnings
    }
}

/// The single admin account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub username: String,

    /// Empty disables login.
    #[serde(default)]
    pub password: String,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: String::new(),
        }
    }
}

/// Key-Value store selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Spin store label; `default` is the component's default store.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "default".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
        }
    }
}

/// Response settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// `Cache-Control` sent with the product list.
    #[serde(default = "default_products_cache_control")]
    pub products_cache_control: String,
}

fn default_products_cache_control() -> String {
    "s-maxage=60, stale-while-revalidate=300".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            products_cache_control: default_products_cache_control(),
        }
    }
}

/// Admin session lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: i64,
}

fn default_ttl_secs() -> i64 {
    threadline_cache::AdminSession::DEFAULT_DURATION_SECS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Request log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Starter `threadline.toml`.
pub fn generate_default_config() -> String {
    format!(
        r#"# Threadline API configuration

[admin]
username = "admin"
# Prefer setting {password_env} in the environment.
password = ""

[store]
name = "default"

[http]
products_cache_control = "{cache_control}"

[session]
ttl_secs = {ttl}

[logging]
level = "info"
format = "json"
"#,
        password_env = ENV_ADMIN_PASSWORD,
        cache_control = default_products_cache_control(),
        ttl = default_ttl_secs(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.store.name, "default");
        assert_eq!(
            config.http.products_cache_control,
            "s-maxage=60, stale-while-revalidate=300"
        );
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let parsed = ApiConfig::from_toml_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, ApiConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = ApiConfig::from_toml_str(
            r#"
            [admin]
            password = "hunter2"

            [logging]
            level = "debug"
            format = "human"
            "#,
        )
        .unwrap();

        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.admin.password, "hunter2");
        assert_eq!(config.logging.format, LogFormat::Human);
        assert_eq!(config.session.ttl_secs, 12 * 60 * 60);
    }

    #[test]
    fn test_json_config() {
        let config =
            ApiConfig::from_json_str(r#"{"store": {"name": "threadline"}}"#).unwrap();
        assert_eq!(config.store.name, "threadline");
    }

    #[test]
    fn test_invalid_config_is_error() {
        let err = ApiConfig::from_toml_str("[session]\nttl_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::default().with_overrides(|name| match name {
            ENV_ADMIN_USERNAME => Some("owner".to_string()),
            ENV_ADMIN_PASSWORD => Some("s3cret".to_string()),
            _ => None,
        });
        assert_eq!(config.admin.username, "owner");
        assert_eq!(config.admin.password, "s3cret");
    }

    #[test]
    fn test_errors_and_warnings() {
        let mut config = ApiConfig::default();
        assert!(config.errors().is_empty());
        assert_eq!(config.warnings().len(), 1);

        config.session.ttl_secs = 0;
        config.admin.username = " ".to_string();
        assert_eq!(config.errors().len(), 2);
    }
}
