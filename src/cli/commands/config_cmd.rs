//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output;

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let value = ctx.config.get(key)?;
    println!("{}", value);
    Ok(())
}

/// Set a repo configuration value.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut repo = ctx.config.repo.clone().unwrap_or_default();
    repo.set(key, value)?;

    let path = Config::write_repo(&ctx.paths, &repo).context("Failed to write config")?;

    output::success(format!("Set {} = {}", key, value), ctx.verbosity());
    tracing::debug!(path = %path.display(), key, value, "wrote repo config");
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    if let Some(path) = config.global_config_loaded_from() {
        println!("# global: {}", path.display());
    }
    if let Some(path) = config.repo_config_loaded_from() {
        println!("# repo: {}", path.display());
    }

    for (key, value) in config.entries() {
        println!("{} = {}", key, value);
    }

    Ok(())
}
