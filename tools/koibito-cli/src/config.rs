//! CLI configuration.

use anyhow::{Context, Result};
use koibito_storefront::catalog::SiteSettings;
use koibito_storefront::checkout::{MessengerLink, DEFAULT_MESSENGER_PAGE_ID};
use koibito_storefront::Currency;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Storefront configuration.
    #[serde(default)]
    pub storefront: StorefrontConfig,

    /// Branding overrides, applied over the catalog's own site settings.
    #[serde(default)]
    pub site: SiteSettings,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Cart currency. Unknown codes fall back to PHP.
    pub fn currency(&self) -> Currency {
        Currency::from_code(&self.storefront.currency).unwrap_or_default()
    }

    pub fn messenger_link(&self) -> MessengerLink {
        MessengerLink::new(self.storefront.messenger_page_id.clone())
    }

    /// Site settings with config overrides taking precedence.
    pub fn site_settings(&self, catalog: SiteSettings) -> SiteSettings {
        self.site.clone().or(catalog)
    }
}

/// Where the catalog lives and where orders go.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Catalog file (TOML or JSON), relative to the working directory.
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// Messenger page that receives orders.
    #[serde(default = "default_page_id")]
    pub messenger_page_id: String,

    /// ISO currency code for prices.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_catalog() -> String {
    "menu.toml".to_string()
}

fn default_page_id() -> String {
    DEFAULT_MESSENGER_PAGE_ID.to_string()
}

fn default_currency() -> String {
    "PHP".to_string()
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            messenger_page_id: default_page_id(),
            currency: default_currency(),
        }
    }
}

/// Generate a default koibito.toml config file.
pub fn generate_default_config(catalog: &str) -> String {
    format!(
        r#"# Koibito storefront configuration

[storefront]
catalog = "{catalog}"
messenger_page_id = "{page_id}"
currency = "PHP"

[site]
# site_name = "Koibito Maki House"
# site_logo = "/logo.jpg"
# site_description = "Maki, ramen and dim sum delivered around Rodriguez and San Mateo"
"#,
        catalog = catalog,
        page_id = DEFAULT_MESSENGER_PAGE_ID,
    )
}
