//! Per-item customization before adding to the cart.
//!
//! A session holds one selected variation (the first by default) and the
//! add-ons picked so far with their quantities. Confirming it yields a
//! [`CartAddition`] for the cart.

use crate::cart::{expand_add_ons, unit_price, Cart, SelectedAddOn};
use crate::catalog::{AddOn, MenuItem, Variation};
use crate::ids::{AddOnId, CartItemId, VariationId};
use crate::money::Money;
use crate::StorefrontError;
use indexmap::IndexMap;
use tracing::debug;

/// What to do when the customer taps "add to cart".
#[derive(Debug, Clone, PartialEq)]
pub enum AddToCart {
    /// Plain items go straight to the cart with quantity 1.
    Direct(CartAddition),
    /// Items with variations or add-ons open a customization session.
    Customize(ItemCustomization),
}

/// Start adding an item to the cart.
pub fn begin_add_to_cart(item: &MenuItem) -> AddToCart {
    if item.needs_customization() {
        AddToCart::Customize(ItemCustomization::new(item.clone()))
    } else {
        AddToCart::Direct(CartAddition {
            item: item.clone(),
            quantity: 1,
            variation: None,
            add_ons: Vec::new(),
        })
    }
}

/// An add-to-cart request ready for [`Cart::add_to_cart`].
#[derive(Debug, Clone, PartialEq)]
pub struct CartAddition {
    pub item: MenuItem,
    pub quantity: i64,
    pub variation: Option<Variation>,
    /// One entry per unit.
    pub add_ons: Vec<AddOn>,
}

impl CartAddition {
    /// Add to `cart`, returning the affected line.
    pub fn apply(&self, cart: &mut Cart) -> Result<CartItemId, StorefrontError> {
        cart.add_to_cart(&self.item, self.quantity, self.variation.as_ref(), &self.add_ons)
    }
}

/// Transient selection state for one menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCustomization {
    item: MenuItem,
    selected_variation: Option<Variation>,
    selected_add_ons: Vec<SelectedAddOn>,
}

impl ItemCustomization {
    pub fn new(item: MenuItem) -> Self {
        let selected_variation = item.default_variation().cloned();
        Self {
            item,
            selected_variation,
            selected_add_ons: Vec::new(),
        }
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn selected_variation(&self) -> Option<&Variation> {
        self.selected_variation.as_ref()
    }

    pub fn selected_add_ons(&self) -> &[SelectedAddOn] {
        &self.selected_add_ons
    }

    /// Switch to another of the item's variations.
    pub fn select_variation(&mut self, id: &VariationId) -> Result<(), StorefrontError> {
        let variation = self
            .item
            .find_variation(id)
            .ok_or_else(|| StorefrontError::VariationNotFound(id.to_string()))?;
        self.selected_variation = Some(variation.clone());
        Ok(())
    }

    /// Set how many units of an add-on are selected.
    ///
    /// Zero removes the add-on from the selection.
    pub fn set_add_on_quantity(&mut self, id: &AddOnId, quantity: i64) -> Result<(), StorefrontError> {
        if quantity < 0 {
            return Err(StorefrontError::InvalidQuantity(quantity));
        }
        let add_on = self
            .item
            .find_add_on(id)
            .ok_or_else(|| StorefrontError::AddOnNotFound(id.to_string()))?;

        if quantity == 0 {
            self.selected_add_ons.retain(|s| &s.add_on.id != id);
            return Ok(());
        }

        match self.selected_add_ons.iter_mut().find(|s| &s.add_on.id == id) {
            Some(existing) => existing.quantity = quantity,
            None => self
                .selected_add_ons
                .push(SelectedAddOn::new(add_on.clone(), quantity)),
        }
        Ok(())
    }

    /// Selected units of an add-on (0 when not selected).
    pub fn add_on_quantity(&self, id: &AddOnId) -> i64 {
        self.selected_add_ons
            .iter()
            .find(|s| &s.add_on.id == id)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }

    pub fn increment_add_on(&mut self, id: &AddOnId) -> Result<(), StorefrontError> {
        self.set_add_on_quantity(id, self.add_on_quantity(id) + 1)
    }

    pub fn decrement_add_on(&mut self, id: &AddOnId) -> Result<(), StorefrontError> {
        let current = self.add_on_quantity(id);
        self.set_add_on_quantity(id, (current - 1).max(0))
    }

    /// Live unit price of the current selection.
    pub fn compute_price(&self) -> Result<Money, StorefrontError> {
        unit_price(
            &self.item,
            self.selected_variation.as_ref(),
            &self.selected_add_ons,
        )
    }

    /// The item's add-ons grouped by label, for the selection sheet.
    pub fn grouped_add_ons(&self) -> IndexMap<&str, Vec<&AddOn>> {
        self.item.grouped_add_ons()
    }

    /// Finish the session: one unit with the current selection.
    ///
    /// The add-on selection is cleared afterwards. The variation stays.
    pub fn confirm(&mut self) -> CartAddition {
        let add_ons = expand_add_ons(&self.selected_add_ons);
        self.selected_add_ons.clear();
        debug!(
            item = %self.item.id,
            variation = ?self.selected_variation.as_ref().map(|v| v.id.as_str()),
            add_ons = add_ons.len(),
            "confirmed customization"
        );
        CartAddition {
            item: self.item.clone(),
            quantity: 1,
            variation: self.selected_variation.clone(),
            add_ons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn php(amount: i64) -> Money {
        Money::from_major(amount, Currency::PHP)
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
    fn test_defaults_to_first_variation() {
        let session = ItemCustomization::new(bento());
        assert_eq!(session.selected_variation().unwrap().id.as_str(), "regular");
        assert!(session.selected_add_ons().is_empty());
        assert_eq!(session.compute_price().unwrap(), php(150));
    }

    #[test]
    fn test_compute_price() {
        let mut session = ItemCustomization::new(bento());
        session.select_variation(&VariationId::new("large")).unwrap();
        session.set_add_on_quantity(&AddOnId::new("egg"), 2).unwrap();
        session.set_add_on_quantity(&AddOnId::new("nori"), 1).unwrap();

        assert_eq!(session.compute_price().unwrap(), php(205));
    }

    #[test]
    fn test_compute_price_uses_discount() {
        let mut item = bento();
        item.discount_price = Some(php(130));
        item.discount_active = true;
        let session = ItemCustomization::new(item);
        assert_eq!(session.compute_price().unwrap(), php(130));
    }

    #[test]
    fn test_zero_quantity_removes_and_is_idempotent() {
        let mut session = ItemCustomization::new(bento());
        let egg = AddOnId::new("egg");
        session.set_add_on_quantity(&egg, 3).unwrap();

        session.set_add_on_quantity(&egg, 0).unwrap();
        assert!(session.selected_add_ons().is_empty());

        session.set_add_on_quantity(&egg, 0).unwrap();
        assert!(session.selected_add_ons().is_empty());
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut session = ItemCustomization::new(bento());
        session.set_add_on_quantity(&AddOnId::new("egg"), 1).unwrap();
        session.set_add_on_quantity(&AddOnId::new("nori"), 1).unwrap();
        session.set_add_on_quantity(&AddOnId::new("egg"), 4).unwrap();

        let selected = session.selected_add_ons();
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].add_on.id.as_str(), "egg");
        assert_eq!(selected[0].quantity, 4);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut session = ItemCustomization::new(bento());
        let nori = AddOnId::new("nori");
        session.increment_add_on(&nori).unwrap();
        session.increment_add_on(&nori).unwrap();
        assert_eq!(session.add_on_quantity(&nori), 2);

        session.decrement_add_on(&nori).unwrap();
        session.decrement_add_on(&nori).unwrap();
        session.decrement_add_on(&nori).unwrap();
        assert_eq!(session.add_on_quantity(&nori), 0);
        assert!(session.selected_add_ons().is_empty());
    }

    #[test]
    fn test_rejects_unknown_ids() {
        let mut session = ItemCustomization::new(bento());
        assert!(matches!(
            session.select_variation(&VariationId::new("jumbo")),
            Err(StorefrontError::VariationNotFound(_))
        ));
        assert!(matches!(
            session.set_add_on_quantity(&AddOnId::new("cheese"), 1),
            Err(StorefrontError::AddOnNotFound(_))
        ));
        assert!(matches!(
            session.set_add_on_quantity(&AddOnId::new("egg"), -1),
            Err(StorefrontError::InvalidQuantity(-1))
        ));
    }

    #[test]
    fn test_confirm_expands_add_ons_and_resets() {
        let mut session = ItemCustomization::new(bento());
        session.select_variation(&VariationId::new("large")).unwrap();
        session.set_add_on_quantity(&AddOnId::new("egg"), 2).unwrap();

        let addition = session.confirm();
        assert_eq!(addition.quantity, 1);
        assert_eq!(addition.variation.as_ref().unwrap().id.as_str(), "large");
        assert_eq!(addition.add_ons.len(), 2);
        assert!(session.selected_add_ons().is_empty());

        let mut cart = Cart::default();
        let id = addition.apply(&mut cart).unwrap();
        assert_eq!(cart.get_item(&id).unwrap().total_price, php(190));
    }

    #[test]
    fn test_plain_item_skips_customization() {
        let tea = MenuItem::new("tea", "Iced Tea", php(40), "drinks");
        match begin_add_to_cart(&tea) {
            AddToCart::Direct(addition) => {
                assert_eq!(addition.quantity, 1);
                assert!(addition.variation.is_none());
                assert!(addition.add_ons.is_empty());
            }
            AddToCart::Customize(_) => panic!("plain item should not be customized"),
        }

        assert!(matches!(begin_add_to_cart(&bento()), AddToCart::Customize(_)));
    }
}
