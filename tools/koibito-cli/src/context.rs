//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use koibito_storefront::source::{FileCatalogSource, StorefrontSnapshot};
use tracing::{debug, warn};

use crate::config::CliConfig;
use crate::output::Output;

/// Names searched for, in order, in each directory walking up.
pub const CONFIG_NAMES: [&str; 3] = ["koibito.toml", ".koibito.toml", "koibito.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory of the config file in use, or `cwd` when running on
    /// defaults. Paths inside the config are relative to it.
    pub config_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::load_in(cwd, config_path, output)
    }

    /// Load context as if started in `cwd`.
    pub fn load_in(cwd: PathBuf, config_path: Option<&str>, output: Output) -> Result<Self> {
        let (config, config_dir) = if let Some(path) = config_path {
            let path = resolve_against(&cwd, path);
            let config = CliConfig::load(&path.to_string_lossy())?;
            (config, parent_or(&path, &cwd))
        } else {
            // Try to find config in current directory or parent directories
            match find_config_file(&cwd) {
                Some(path) => {
                    debug!(path = %path.display(), "using config file");
                    let config = CliConfig::load(&path.to_string_lossy()).unwrap_or_else(|e| {
                        warn!(
                            path = %path.display(),
                            error = %format!("{:#}", e),
                            "ignoring unreadable config file, using defaults"
                        );
                        CliConfig::default()
                    });
                    (config, parent_or(&path, &cwd))
                }
                None => (CliConfig::default(), cwd.clone()),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_dir,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_against(&self.cwd, path)
    }

    /// Catalog file named by the config, relative to the config's directory.
    pub fn catalog_path(&self) -> PathBuf {
        resolve_against(&self.config_dir, &self.config.storefront.catalog)
    }

    /// Fetch the catalog with a spinner. Never fails; a missing catalog
    /// shows up as an empty menu.
    pub async fn load_snapshot(&self) -> StorefrontSnapshot {
        let source = FileCatalogSource::new(self.catalog_path());
        let spinner = self.output.spinner("Loading menu...");
        let mut snapshot = StorefrontSnapshot::load(&source).await;
        spinner.finish_and_clear();

        snapshot.site_settings = self.config.site_settings(snapshot.site_settings);
        snapshot
    }
}

fn resolve_against(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

fn parent_or(path: &Path, fallback: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf())
}

/// Find a config file in the directory tree.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
