//! Configuration management commands.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::{json, Value};
use suntrex_catalog::search::SortOption;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, LogFormat, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { catalog, force } => init_config(&catalog, force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output
        .kv("path", ctx.config.catalog.path.as_deref().unwrap_or("(unset)"));

    ctx.output.info("");
    ctx.output.info("[browse]");
    ctx.output
        .kv("page_size", &ctx.config.browse.page_size.to_string());
    ctx.output.kv("default_sort", &ctx.config.browse.default_sort);

    ctx.output.info("");
    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level);
    ctx.output.kv("format", ctx.config.log.format.as_str());

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "key": key, "value": value }));
    } else {
        match value {
            Value::String(s) => println!("{}", s),
            other => println!("{}", other),
        }
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => find_config_file(ctx)?,
    };

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(catalog: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        if ctx.output.is_json() {
            bail!(
                "Config file already exists: {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        let confirmed = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", config_path.display()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Config init cancelled");
            return Ok(());
        }
    }

    if !ctx.resolve_path(catalog).exists() {
        ctx.output
            .warn(&format!("Catalog file {} does not exist yet", catalog));
    }

    tokio::fs::write(&config_path, generate_default_config(catalog)).await?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.check();

    if let Some(path) = ctx.config.catalog.path.as_deref() {
        if !ctx.resolve_path(path).exists() {
            ctx.output
                .warn(&format!("Warning: catalog.path {} does not exist", path));
        }
    }

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

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<Value> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "path"] => Ok(config
            .catalog
            .path
            .as_ref()
            .map(|p| json!(p))
            .unwrap_or(Value::Null)),
        ["browse", "page_size"] => Ok(json!(config.browse.page_size)),
        ["browse", "default_sort"] => Ok(json!(config.browse.default_sort)),
        ["log", "level"] => Ok(json!(config.log.level)),
        ["log", "format"] => Ok(json!(config.log.format.as_str())),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["catalog", "path"] => config.catalog.path = Some(value.to_string()),
        ["browse", "page_size"] => {
            let size: usize = value.parse()?;
            if size == 0 {
                bail!("browse.page_size must be at least 1");
            }
            config.browse.page_size = size;
        }
        ["browse", "default_sort"] => {
            let sort = SortOption::from_str(value)?;
            config.browse.default_sort = sort.as_str().to_string();
        }
        ["log", "level"] => config.log.level = value.to_string(),
        ["log", "format"] => config.log.format = value.parse::<LogFormat>()?,
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn find_config_file(ctx: &Context) -> Result<PathBuf> {
    for name in &CONFIG_FILE_NAMES {
        let path = ctx.cwd.join(name);
        if path.exists() {
            return Ok(path);
        }
    }
    bail!("No config file found. Run `suntrex config init` to create one.")
}
