//! The browsable menu: categories plus the items listed under them.
//!
//! Everything here is derived on demand from the current catalog snapshot.

use crate::catalog::{Category, MenuItem};
use crate::ids::{CategoryId, MenuItemId};
use crate::StorefrontError;
use serde::{Deserialize, Serialize};

/// Category opened first when the catalog has it.
pub const PREFERRED_CATEGORY: &str = "dim-sum";

/// A filter over menu items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MenuFilter {
    /// Items in one category.
    Category(CategoryId),
    /// Items flagged popular.
    Popular,
    /// Items that can be ordered now.
    Available,
    /// Items with an active discount.
    OnDiscount,
    /// Case-insensitive match on name or description.
    Text(String),
}

impl MenuFilter {
    pub fn category(id: impl Into<CategoryId>) -> Self {
        MenuFilter::Category(id.into())
    }

    pub fn text(query: impl Into<String>) -> Self {
        MenuFilter::Text(query.into())
    }

    /// Check whether an item passes this filter.
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            MenuFilter::Category(id) => &item.category == id,
            MenuFilter::Popular => item.popular,
            MenuFilter::Available => item.available,
            MenuFilter::OnDiscount => item.is_on_discount(),
            MenuFilter::Text(query) => {
                let query = query.trim().to_lowercase();
                query.is_empty()
                    || item.name.to_lowercase().contains(&query)
                    || item.description.to_lowercase().contains(&query)
            }
        }
    }
}

/// Categories and items as served by the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(categories: Vec<Category>, items: Vec<MenuItem>) -> Self {
        Self { categories, items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by id.
    pub fn item(&self, id: &MenuItemId) -> Result<&MenuItem, StorefrontError> {
        self.items
            .iter()
            .find(|i| &i.id == id)
            .ok_or_else(|| StorefrontError::MenuItemNotFound(id.to_string()))
    }

    /// Look up a category by id.
    pub fn category(&self, id: &CategoryId) -> Result<&Category, StorefrontError> {
        self.categories
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| StorefrontError::CategoryNotFound(id.to_string()))
    }

    /// Items listed under a category, in catalog order.
    pub fn items_in_category(&self, category: &CategoryId) -> Vec<&MenuItem> {
        self.filter(&[MenuFilter::Category(category.clone())])
    }

    /// Items passing every filter, in catalog order.
    pub fn filter(&self, filters: &[MenuFilter]) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| filters.iter().all(|f| f.matches(item)))
            .collect()
    }

    pub fn popular_items(&self) -> Vec<&MenuItem> {
        self.filter(&[MenuFilter::Popular])
    }

    pub fn available_items(&self) -> Vec<&MenuItem> {
        self.filter(&[MenuFilter::Available])
    }

    pub fn search(&self, query: &str) -> Vec<&MenuItem> {
        self.filter(&[MenuFilter::text(query)])
    }

    /// Active categories that have at least one item, by sort order.
    ///
    /// Empty categories are skipped, the same as an empty section is not
    /// rendered.
    pub fn visible_categories(&self) -> Vec<&Category> {
        let mut visible: Vec<&Category> = self
            .categories
            .iter()
            .filter(|c| c.active && self.items.iter().any(|i| i.category == c.id))
            .collect();
        visible.sort_by_key(|c| c.sort_order);
        visible
    }

    /// The category opened first: dim sum when present, else the first one.
    pub fn default_category(&self) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.id.as_str() == PREFERRED_CATEGORY)
            .or_else(|| self.categories.first())
    }

    /// Keep `current` if it still exists, otherwise fall back to the default.
    pub fn resolve_active_category(&self, current: &CategoryId) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| &c.id == current)
            .or_else(|| self.default_category())
    }

    /// Visible categories paired with their items.
    pub fn sections(&self) -> Vec<(&Category, Vec<&MenuItem>)> {
        self.visible_categories()
            .into_iter()
            .map(|c| (c, self.items_in_category(&c.id)))
            .collect()
    }
}
