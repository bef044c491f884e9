//! Catalog sources.
//!
//! The storefront only reads its catalog. Each list arrives as a
//! [`Loadable`] snapshot: the records plus a loading flag. A failed fetch
//! leaves an empty list behind and is logged, never retried.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{Category, Menu, MenuItem, PaymentMethod, SiteSettings};
use crate::StorefrontError;

/// Result type for catalog fetches.
pub type SourceResult<T> = Result<T, StorefrontError>;

/// Read-only access to the restaurant's catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn categories(&self) -> SourceResult<Vec<Category>>;

    async fn menu_items(&self) -> SourceResult<Vec<MenuItem>>;

    async fn payment_methods(&self) -> SourceResult<Vec<PaymentMethod>>;

    async fn site_settings(&self) -> SourceResult<SiteSettings>;
}

/// Records plus a loading flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loadable<T> {
    pub items: Vec<T>,
    pub loading: bool,
}

impl<T> Loadable<T> {
    /// Nothing fetched yet.
    pub fn pending() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
        }
    }

    pub fn ready(items: Vec<T>) -> Self {
        Self {
            items,
            loading: false,
        }
    }

    /// Settle a fetch. Errors degrade to an empty list.
    pub fn settle(result: SourceResult<Vec<T>>, what: &str) -> Self {
        match result {
            Ok(items) => {
                debug!(what, count = items.len(), "catalog fetch settled");
                Self::ready(items)
            }
            Err(e) => {
                warn!(what, error = %e, "catalog fetch failed, showing nothing");
                Self::ready(Vec::new())
            }
        }
    }
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::pending()
    }
}

/// Everything the storefront renders from, fetched once.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontSnapshot {
    pub categories: Loadable<Category>,
    pub menu_items: Loadable<MenuItem>,
    pub payment_methods: Loadable<PaymentMethod>,
    pub site_settings: SiteSettings,
}

impl StorefrontSnapshot {
    /// Fetch all catalog lists concurrently.
    ///
    /// Menu items carrying a negative price anywhere are left out.
    pub async fn load(source: &dyn CatalogSource) -> Self {
        let (categories, menu_items, payment_methods, site_settings) = tokio::join!(
            source.categories(),
            source.menu_items(),
            source.payment_methods(),
            source.site_settings(),
        );

        let site_settings = site_settings.unwrap_or_else(|e| {
            warn!(error = %e, "site settings unavailable, using defaults");
            SiteSettings::default()
        });

        let mut menu_items = Loadable::settle(menu_items, "menu items");
        menu_items.items.retain(|item| {
            if item.has_negative_price() {
                warn!(item = %item.id, "dropping menu item with a negative price");
                return false;
            }
            true
        });

        Self {
            categories: Loadable::settle(categories, "categories"),
            menu_items,
            payment_methods: Loadable::settle(payment_methods, "payment methods"),
            site_settings,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.categories.loading || self.menu_items.loading || self.payment_methods.loading
    }

    pub fn menu(&self) -> Menu {
        Menu::new(self.categories.items.clone(), self.menu_items.items.clone())
    }
}

/// A whole catalog in one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogDocument {
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
}

impl CatalogDocument {
    /// Parse TOML, or JSON when `path` ends in `.json`.
    pub fn parse(content: &str, path: &Path) -> Result<Self, StorefrontError> {
        if path.extension().map_or(false, |e| e == "json") {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    document: CatalogDocument,
}

impl StaticCatalogSource {
    pub fn new(document: CatalogDocument) -> Self {
        Self { document }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn categories(&self) -> SourceResult<Vec<Category>> {
        Ok(self.document.categories.clone())
    }

    async fn menu_items(&self) -> SourceResult<Vec<MenuItem>> {
        Ok(self.document.menu_items.clone())
    }

    async fn payment_methods(&self) -> SourceResult<Vec<PaymentMethod>> {
        Ok(self.document.payment_methods.clone())
    }

    async fn site_settings(&self) -> SourceResult<SiteSettings> {
        Ok(self.document.site.clone())
    }
}

/// Catalog read from a TOML or JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> SourceResult<CatalogDocument> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StorefrontError::CatalogLoad(format!("{}: {}", self.path.display(), e))
        })?;
        CatalogDocument::parse(&content, &self.path)
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn categories(&self) -> SourceResult<Vec<Category>> {
        Ok(self.read().await?.categories)
    }

    async fn menu_items(&self) -> SourceResult<Vec<MenuItem>> {
        Ok(self.read().await?.menu_items)
    }

    async fn payment_methods(&self) -> SourceResult<Vec<PaymentMethod>> {
        Ok(self.read().await?.payment_methods)
    }

    async fn site_settings(&self) -> SourceResult<SiteSettings> {
        Ok(self.read().await?.site)
    }
}
