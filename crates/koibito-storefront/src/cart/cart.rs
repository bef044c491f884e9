//! Cart and cart line types.

use crate::cart::{collapse_add_ons, unit_price, CartPricing, ConfigurationKey, LinePricing, SelectedAddOn};
use crate::catalog::{AddOn, MenuItem, Variation};
use crate::error::StorefrontError;
use crate::ids::{CartItemId, MenuItemId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// The customer's basket.
///
/// Lines keep insertion order for display. Adding an item whose
/// configuration (item, variation, add-on multiset) matches an existing line
/// increases that line's quantity instead of appending a new one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Lines in the cart.
    pub items: Vec<CartItem>,
    /// Cart currency.
    pub currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Add an item to the cart.
    ///
    /// `add_ons` is the flat list produced by customization, one entry per
    /// unit. Returns the id of the line that was created or grown.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The item is unavailable
    /// - The variation or an add-on is not offered by the item
    /// - The line would exceed MAX_QUANTITY_PER_ITEM
    pub fn add_to_cart(
        &mut self,
        item: &MenuItem,
        quantity: i64,
        variation: Option<&Variation>,
        add_ons: &[AddOn],
    ) -> Result<CartItemId, StorefrontError> {
        if quantity <= 0 {
            return Err(StorefrontError::InvalidQuantity(quantity));
        }
        if !item.available {
            return Err(StorefrontError::ItemUnavailable(item.id.to_string()));
        }
        if let Some(variation) = variation {
            if item.find_variation(&variation.id).is_none() {
                return Err(StorefrontError::VariationNotFound(variation.id.to_string()));
            }
        }
        if let Some(unknown) = add_ons.iter().find(|a| item.find_add_on(&a.id).is_none()) {
            return Err(StorefrontError::AddOnNotFound(unknown.id.to_string()));
        }

        let selected = collapse_add_ons(add_ons);
        let key = ConfigurationKey::new(&item.id, variation, &selected);
        let id = key.cart_item_id();

        // Merge into the line with the same configuration
        if let Some(existing) = self.items.iter_mut().find(|i| i.key == key) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(StorefrontError::Overflow)?;
            check_limit(new_quantity)?;

            existing.quantity = new_quantity;
            debug!(cart_item = %id, quantity = new_quantity, "merged into existing cart line");
            return Ok(id);
        }

        check_limit(quantity)?;

        let total_price = unit_price(item, variation, &selected)?;
        if total_price.currency != self.currency {
            return Err(StorefrontError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: total_price.currency.code().to_string(),
            });
        }

        self.items.push(CartItem {
            id: id.clone(),
            key,
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            quantity,
            selected_variation: variation.cloned(),
            selected_add_ons: selected,
            total_price,
        });
        debug!(cart_item = %id, quantity, unit_price = %total_price, "added cart line");
        Ok(id)
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero or less removes the line. Returns whether a line
    /// was found.
    pub fn update_quantity(
        &mut self,
        id: &CartItemId,
        quantity: i64,
    ) -> Result<bool, StorefrontError> {
        if quantity <= 0 {
            return Ok(self.remove_from_cart(id));
        }

        check_limit(quantity)?;

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                debug!(cart_item = %id, quantity, "updated cart line quantity");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a line from the cart.
    pub fn remove_from_cart(&mut self, id: &CartItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        let removed = self.items.len() < len_before;
        if removed {
            debug!(cart_item = %id, "removed cart line");
        }
        removed
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        debug!("cleared cart");
    }

    /// Sum of `total_price * quantity` over all lines.
    pub fn total_price(&self) -> Result<Money, StorefrontError> {
        let line_totals = self
            .items
            .iter()
            .map(CartItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(line_totals.iter(), self.currency).ok_or(StorefrontError::Overflow)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Units of a menu item in the cart, across all its configurations.
    pub fn quantity_of(&self, menu_item_id: &MenuItemId) -> i64 {
        self.items
            .iter()
            .filter(|i| &i.menu_item_id == menu_item_id)
            .map(|i| i.quantity)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Per-line pricing plus subtotal.
    pub fn pricing(&self) -> Result<CartPricing, StorefrontError> {
        let lines = self
            .items
            .iter()
            .map(|item| {
                Ok(LinePricing {
                    cart_item_id: item.id.clone(),
                    unit_price: item.total_price,
                    quantity: item.quantity,
                    total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, StorefrontError>>()?;

        Ok(CartPricing {
            subtotal: self.total_price()?,
            item_count: self.item_count(),
            lines,
        })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::PHP)
    }
}

fn check_limit(quantity: i64) -> Result<(), StorefrontError> {
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(StorefrontError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}

/// One configured, priced line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Derived from the configuration, stable for identical configurations.
    pub id: CartItemId,
    /// The configuration this line holds. Lines merge only on an equal key.
    pub key: ConfigurationKey,
    /// Menu item this line was created from.
    pub menu_item_id: MenuItemId,
    /// Item name (denormalized for display).
    pub name: String,
    pub quantity: i64,
    pub selected_variation: Option<Variation>,
    pub selected_add_ons: Vec<SelectedAddOn>,
    /// Price per unit including variation and add-ons, fixed at add time.
    pub total_price: Money,
}

impl CartItem {
    /// total_price * quantity.
    pub fn line_total(&self) -> Result<Money, StorefrontError> {
        self.total_price
            .try_multiply(self.quantity)
            .ok_or(StorefrontError::Overflow)
    }

    /// Add-on labels joined for display, e.g. "Egg x2, Nori".
    pub fn add_on_summary(&self) -> Option<String> {
        if self.selected_add_ons.is_empty() {
            return None;
        }
        Some(
            self.selected_add_ons
                .iter()
                .map(SelectedAddOn::label)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn php(amount: i64) -> Money {
        Money::from_major(amount, Currency::PHP)
    }

    fn plain(id: &str, price: i64) -> MenuItem {
        MenuItem::new(id, id.to_uppercase(), php(price), "maki")
    }

    fn bento() -> MenuItem {
        let mut item = MenuItem::new("bento", "Bento", php(150), "bento");
        item.variations = vec![
            Variation::new("regular", "Regular", php(0)),
            Variation::new("large", "Large", php(20)),
        ];
        item.add_ons = vec![
            AddOn::new("egg", "Egg", php(10), "Extras"),
            AddOn::new("nori", "Nori", php(15), "Extras"),
        ];
        item
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.currency, Currency::PHP);
    }

    #[test]
    fn test_add_plain_item() {
        let mut cart = Cart::default();
        let id = cart.add_to_cart(&plain("tea", 40), 2, None, &[]).unwrap();

        assert_eq!(id.as_str(), "tea");
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.get_item(&id).unwrap().total_price, php(40));
    }

    #[test]
    fn test_add_customized_item_prices_unit() {
        let item = bento();
        let mut cart = Cart::default();
        let add_ons = vec![item.add_ons[0].clone(), item.add_ons[0].clone(), item.add_ons[1].clone()];
        let id = cart
            .add_to_cart(&item, 1, Some(&item.variations[1]), &add_ons)
            .unwrap();

        let line = cart.get_item(&id).unwrap();
        assert_eq!(line.total_price, php(205));
        assert_eq!(line.add_on_summary().as_deref(), Some("Egg x2, Nori"));
    }

    #[test]
    fn test_same_configuration_merges() {
        let item = bento();
        let egg = item.add_ons[0].clone();
        let nori = item.add_ons[1].clone();
        let large = item.variations[1].clone();
        let mut cart = Cart::default();

        let first = cart
            .add_to_cart(&item, 1, Some(&large), &[egg.clone(), nori.clone()])
            .unwrap();
        // Same multiset in a different order
        let second = cart
            .add_to_cart(&item, 2, Some(&large), &[nori.clone(), egg.clone()])
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_different_configuration_appends() {
        let item = bento();
        let egg = item.add_ons[0].clone();
        let mut cart = Cart::default();

        cart.add_to_cart(&item, 1, Some(&item.variations[0]), &[]).unwrap();
        cart.add_to_cart(&item, 1, Some(&item.variations[1]), &[]).unwrap();
        cart.add_to_cart(&item, 1, Some(&item.variations[1]), &[egg.clone()]).unwrap();
        cart.add_to_cart(&item, 1, Some(&item.variations[1]), &[egg.clone(), egg]).unwrap();

        assert_eq!(cart.items.len(), 4);
        assert_eq!(cart.quantity_of(&item.id), 4);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::default();
        cart.add_to_cart(&plain("c", 10), 1, None, &[]).unwrap();
        cart.add_to_cart(&plain("a", 10), 1, None, &[]).unwrap();
        cart.add_to_cart(&plain("b", 10), 1, None, &[]).unwrap();
        cart.add_to_cart(&plain("a", 10), 1, None, &[]).unwrap();

        let ids: Vec<&str> = cart.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = Cart::default();
        let id = cart.add_to_cart(&plain("tea", 40), 1, None, &[]).unwrap();

        assert!(cart.update_quantity(&id, 0).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::default();
        let id = cart.add_to_cart(&plain("tea", 40), 1, None, &[]).unwrap();

        assert!(cart.update_quantity(&id, 5).unwrap());
        assert_eq!(cart.item_count(), 5);
        assert!(!cart.update_quantity(&CartItemId::new("missing"), 2).unwrap());
    }

    #[test]
    fn test_total_price() {
        let mut cart = Cart::default();
        cart.add_to_cart(&plain("a", 100), 2, None, &[]).unwrap();
        cart.add_to_cart(&plain("b", 50), 1, None, &[]).unwrap();

        assert_eq!(cart.total_price().unwrap(), php(250));

        let pricing = cart.pricing().unwrap();
        assert_eq!(pricing.subtotal, php(250));
        assert_eq!(pricing.item_count, 3);
        assert_eq!(pricing.lines[0].total, php(200));
    }

    #[test]
    fn test_unit_price_fixed_at_add_time() {
        let mut item = plain("tea", 40);
        let mut cart = Cart::default();
        let id = cart.add_to_cart(&item, 1, None, &[]).unwrap();

        item.base_price = php(60);
        cart.add_to_cart(&item, 1, None, &[]).unwrap();

        let line = cart.get_item(&id).unwrap();
        assert_eq!(line.total_price, php(40));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        let id = cart.add_to_cart(&plain("a", 10), 1, None, &[]).unwrap();
        cart.add_to_cart(&plain("b", 10), 1, None, &[]).unwrap();

        assert!(cart.remove_from_cart(&id));
        assert!(!cart.remove_from_cart(&id));
        assert_eq!(cart.items.len(), 1);

        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price().unwrap(), php(0));
    }

    #[test]
    fn test_rejects_invalid_adds() {
        let mut cart = Cart::default();
        assert!(matches!(
            cart.add_to_cart(&plain("a", 10), 0, None, &[]),
            Err(StorefrontError::InvalidQuantity(0))
        ));
        assert!(matches!(
            cart.add_to_cart(&plain("a", 10), MAX_QUANTITY_PER_ITEM + 1, None, &[]),
            Err(StorefrontError::QuantityExceedsLimit(..))
        ));

        let mut sold_out = plain("b", 10);
        sold_out.available = false;
        assert!(matches!(
            cart.add_to_cart(&sold_out, 1, None, &[]),
            Err(StorefrontError::ItemUnavailable(_))
        ));

        let stray = AddOn::new("cheese", "Cheese", php(5), "Extras");
        assert!(matches!(
            cart.add_to_cart(&bento(), 1, None, &[stray]),
            Err(StorefrontError::AddOnNotFound(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_separator_in_item_id_does_not_merge() {
        let bento = bento();
        let large = bento.variations[1].clone();
        let combo = MenuItem::new("bento:large", "Bento Combo", php(300), "bento");

        let mut cart = Cart::default();
        let combo_line = cart.add_to_cart(&combo, 1, None, &[]).unwrap();
        let bento_line = cart.add_to_cart(&bento, 1, Some(&large), &[]).unwrap();

        assert_ne!(combo_line, bento_line);
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.get_item(&combo_line).unwrap().total_price, php(300));
        assert_eq!(cart.get_item(&bento_line).unwrap().total_price, php(170));
        assert_eq!(cart.total_price().unwrap(), php(470));

        cart.add_to_cart(&bento, 1, Some(&large), &[]).unwrap();
        assert_eq!(cart.get_item(&bento_line).unwrap().quantity, 2);
        assert_eq!(cart.get_item(&combo_line).unwrap().quantity, 1);
    }
}
