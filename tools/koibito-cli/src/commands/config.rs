//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{find_config_file, Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { catalog, force } => init_config(&catalog, force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match find_config_file(&ctx.cwd) {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    // Storefront section
    ctx.output.info("");
    ctx.output.info("[storefront]");
    ctx.output.kv("catalog", &ctx.catalog_path().display().to_string());
    ctx.output.kv("messenger_page_id", &ctx.config.storefront.messenger_page_id);
    ctx.output.kv("currency", ctx.config.currency().code());

    // Site section
    let site = &ctx.config.site;
    ctx.output.info("");
    ctx.output.info("[site]");
    ctx.output.kv("site_name", site.site_name());
    ctx.output.kv("site_logo", site.site_logo());
    if let Some(description) = &site.site_description {
        ctx.output.kv("site_description", description);
    }

    Ok(())
}

async fn init_config(catalog: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(catalog))?;
    ctx.output
        .success(&format!("Created {}", config_path.display()));

    if !ctx.resolve_path(catalog).exists() {
        ctx.output
            .warn(&format!("Catalog {} does not exist yet", catalog));
    }

    Ok(())
}
