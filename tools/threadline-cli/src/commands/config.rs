//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use threadline_api::config::{generate_default_config, ENV_ADMIN_PASSWORD};

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    if !config.admin.password.is_empty() {
        config.admin.password = "********".to_string();
    }

    if ctx.output.is_json() {
        ctx.output.json(&config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[admin]");
    ctx.output.kv("username", &config.admin.username);
    ctx.output.kv("password", &config.admin.password);

    ctx.output.info("[store]");
    ctx.output.kv("name", &config.store.name);

    ctx.output.info("[http]");
    ctx.output
        .kv("products_cache_control", &config.http.products_cache_control);

    ctx.output.info("[session]");
    ctx.output.kv("ttl_secs", &config.session.ttl_secs.to_string());

    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level.to_string());
    ctx.output
        .kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("threadline.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));
    ctx.output.info(&format!(
        "Set {} before deploying to enable admin login",
        ENV_ADMIN_PASSWORD
    ));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.errors();
    let warnings = ctx.config.warnings();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": errors.is_empty(),
            "errors": errors,
            "warnings": warnings,
        }));
    } else {
        if errors.is_empty() && warnings.is_empty() {
            ctx.output.success("Configuration is valid");
            return Ok(());
        }

        for error in &errors {
            ctx.output.error(&format!("Error: {}", error));
        }

        for warning in &warnings {
            ctx.output.warn(&format!("Warning: {}", warning));
        }
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
