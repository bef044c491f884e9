//! Selected add-ons and the configuration key that identifies a cart line.

use crate::catalog::{AddOn, Variation};
use crate::ids::{AddOnId, CartItemId, MenuItemId};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

/// Characters that delimit the parts of a cart line id.
const ID_SEPARATORS: &AsciiSet = &CONTROLS.add(b'%').add(b':').add(b'+').add(b'*');

/// An add-on together with how many units were picked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedAddOn {
    #[serde(flatten)]
    pub add_on: AddOn,
    pub quantity: i64,
}

impl SelectedAddOn {
    pub fn new(add_on: AddOn, quantity: i64) -> Self {
        Self { add_on, quantity }
    }

    /// "Egg" for one unit, "Egg x2" for more.
    pub fn label(&self) -> String {
        if self.quantity > 1 {
            format!("{} x{}", self.add_on.name, self.quantity)
        } else {
            self.add_on.name.clone()
        }
    }
}

/// Collapse a flat add-on list (one entry per unit) into quantities.
///
/// Order follows the first appearance of each add-on.
pub fn collapse_add_ons(flat: &[AddOn]) -> Vec<SelectedAddOn> {
    let mut selected: Vec<SelectedAddOn> = Vec::new();
    for add_on in flat {
        match selected.iter_mut().find(|s| s.add_on.id == add_on.id) {
            Some(existing) => existing.quantity += 1,
            None => selected.push(SelectedAddOn::new(add_on.clone(), 1)),
        }
    }
    selected
}

/// Expand selected add-ons into one entry per unit.
pub fn expand_add_ons(selected: &[SelectedAddOn]) -> Vec<AddOn> {
    selected
        .iter()
        .flat_map(|s| std::iter::repeat(s.add_on.clone()).take(s.quantity.max(0) as usize))
        .collect()
}

/// What makes two cart lines the same line: item, variation and the add-on
/// multiset (order-insensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigurationKey {
    item_id: MenuItemId,
    variation_id: Option<String>,
    add_ons: Vec<(AddOnId, i64)>,
}

impl ConfigurationKey {
    pub fn new(
        item_id: &MenuItemId,
        variation: Option<&Variation>,
        add_ons: &[SelectedAddOn],
    ) -> Self {
        let mut counts: Vec<(AddOnId, i64)> = add_ons
            .iter()
            .filter(|s| s.quantity > 0)
            .map(|s| (s.add_on.id.clone(), s.quantity))
            .collect();
        counts.sort();
        Self {
            item_id: item_id.clone(),
            variation_id: variation.map(|v| v.id.as_str().to_string()),
            add_ons: counts,
        }
    }

    pub fn item_id(&self) -> &MenuItemId {
        &self.item_id
    }

    /// Cart line id derived from the key, e.g. `bento:large+egg*2+nori*1`.
    ///
    /// Separator characters inside catalog ids are percent-escaped, so
    /// distinct keys never share an id.
    pub fn cart_item_id(&self) -> CartItemId {
        let mut id = escape_id_part(self.item_id.as_str());
        if let Some(variation) = &self.variation_id {
            id.push(':');
            id.push_str(&escape_id_part(variation));
        }
        for (add_on, qty) in &self.add_ons {
            id.push('+');
            id.push_str(&escape_id_part(add_on.as_str()));
            id.push('*');
            id.push_str(&qty.to_string());
        }
        CartItemId::new(id)
    }
}

fn escape_id_part(part: &str) -> String {
    utf8_percent_encode(part, ID_SEPARATORS).to_string()
}
