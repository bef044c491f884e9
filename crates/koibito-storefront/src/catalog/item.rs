//! Menu items, variations and add-ons.

use crate::ids::{AddOnId, CategoryId, MenuItemId, VariationId};
use crate::money::Money;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Image shown when an item has no image or its image fails to load.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-food.jpg";

/// A purchasable entry on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    /// Unique item identifier.
    pub id: MenuItemId,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Regular price.
    pub base_price: Money,
    /// Promotional price, used only while `discount_active` is set.
    #[serde(default)]
    pub discount_price: Option<Money>,
    /// Whether the promotional price applies.
    #[serde(default)]
    pub discount_active: bool,
    /// Whether the item can be ordered right now.
    #[serde(default = "default_true")]
    pub available: bool,
    /// Shown with a "popular" badge.
    #[serde(default)]
    pub popular: bool,
    /// Category this item is listed under.
    pub category: CategoryId,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Size/option choices. The first one is the default selection.
    #[serde(default)]
    pub variations: Vec<Variation>,
    /// Optional extras.
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Create a plain, available item with no variations or add-ons.
    pub fn new(
        id: impl Into<MenuItemId>,
        name: impl Into<String>,
        base_price: Money,
        category: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            base_price,
            discount_price: None,
            discount_active: false,
            available: true,
            popular: false,
            category: category.into(),
            image: None,
            variations: Vec::new(),
            add_ons: Vec::new(),
        }
    }

    /// Check if the promotional price currently applies.
    pub fn is_on_discount(&self) -> bool {
        self.discount_active && self.discount_price.is_some()
    }

    /// The price customization starts from: the discount price while a
    /// discount is active, otherwise the base price.
    pub fn effective_price(&self) -> Money {
        match self.discount_price {
            Some(price) if self.discount_active => price,
            _ => self.base_price,
        }
    }

    /// Percentage saved by the active discount, if any.
    pub fn discount_percentage(&self) -> Option<f64> {
        if !self.is_on_discount() || self.base_price.amount_cents <= 0 {
            return None;
        }
        let savings = self.base_price.amount_cents - self.effective_price().amount_cents;
        if savings <= 0 {
            return None;
        }
        Some((savings as f64 / self.base_price.amount_cents as f64) * 100.0)
    }

    /// Whether any price on the item, its variations or add-ons is below zero.
    pub fn has_negative_price(&self) -> bool {
        self.base_price.is_negative()
            || self.discount_price.map_or(false, |p| p.is_negative())
            || self.variations.iter().any(|v| v.price.is_negative())
            || self.add_ons.iter().any(|a| a.price.is_negative())
    }

    /// Items with variations or add-ons open a customization step before
    /// being added to the cart.
    pub fn needs_customization(&self) -> bool {
        !self.variations.is_empty() || !self.add_ons.is_empty()
    }

    /// The variation selected when customization opens.
    pub fn default_variation(&self) -> Option<&Variation> {
        self.variations.first()
    }

    pub fn find_variation(&self, id: &VariationId) -> Option<&Variation> {
        self.variations.iter().find(|v| &v.id == id)
    }

    pub fn find_add_on(&self, id: &AddOnId) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| &a.id == id)
    }

    /// Image URL, or the placeholder when none is set.
    pub fn image_or_placeholder(&self) -> &str {
        match self.image.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }

    /// Add-ons grouped by their category label, in first-appearance order.
    pub fn grouped_add_ons(&self) -> IndexMap<&str, Vec<&AddOn>> {
        let mut groups: IndexMap<&str, Vec<&AddOn>> = IndexMap::new();
        for add_on in &self.add_ons {
            groups.entry(add_on.category.as_str()).or_default().push(add_on);
        }
        groups
    }
}

/// A size or option modifier (e.g., "Regular", "Family Tray").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Variation {
    pub id: VariationId,
    pub name: String,
    /// Added to the item's effective price.
    pub price: Money,
}

impl Variation {
    pub fn new(id: impl Into<VariationId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// An optional extra with its own price delta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AddOn {
    pub id: AddOnId,
    pub name: String,
    /// Added to the item's price once per selected unit.
    pub price: Money,
    /// Grouping label (e.g., "Sauces", "Extras").
    pub category: String,
}

impl AddOn {
    pub fn new(
        id: impl Into<AddOnId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
        }
    }
}
