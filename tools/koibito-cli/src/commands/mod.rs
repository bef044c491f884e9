//! CLI command implementations.

pub mod config;
pub mod item;
pub mod menu;
pub mod order;

use clap::{Args, Subcommand};

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Only show this category.
    #[arg(long)]
    pub category: Option<String>,

    /// Only show popular items.
    #[arg(short, long)]
    pub popular: bool,

    /// Only show items that can be ordered now.
    #[arg(short, long)]
    pub available: bool,

    /// Search names and descriptions.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the item command.
#[derive(Args)]
pub struct ItemArgs {
    /// Menu item ID.
    pub id: String,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Order file (TOML or JSON).
    pub file: String,

    /// Payment method ID, overriding the order file.
    #[arg(short, long)]
    pub payment: Option<String>,

    /// Skip prompts and confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default koibito.toml in the current directory.
    Init {
        /// Catalog file the config points at.
        #[arg(long, default_value = "menu.toml")]
        catalog: String,

        /// Overwrite an existing config.
        #[arg(short, long)]
        force: bool,
    },
}
