//! Menu categories.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A section of the menu (e.g., "Dim Sum", "Maki").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier, also used as the section anchor.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Emoji shown above the section heading.
    #[serde(default)]
    pub icon: String,
    /// Position in the navigation bar.
    #[serde(default)]
    pub sort_order: i32,
    /// Inactive categories are hidden from the menu.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            sort_order: 0,
            active: true,
        }
    }

    /// Heading shown for the section, icon first.
    pub fn heading(&self) -> String {
        if self.icon.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.icon, self.name)
        }
    }
}
