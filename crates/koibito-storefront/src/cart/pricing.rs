//! Unit price arithmetic and cart pricing breakdowns.

use crate::cart::SelectedAddOn;
use crate::catalog::{MenuItem, Variation};
use crate::ids::CartItemId;
use crate::money::Money;
use crate::StorefrontError;
use serde::{Deserialize, Serialize};

/// Price of one unit of a configured item.
///
/// Effective price (discounted when a discount is active) plus the variation
/// delta plus each add-on delta times its selected quantity. The same rule
/// prices the customization preview and the cart line, so the two never
/// disagree.
pub fn unit_price(
    item: &MenuItem,
    variation: Option<&Variation>,
    add_ons: &[SelectedAddOn],
) -> Result<Money, StorefrontError> {
    let base = item.effective_price();
    let mut price = base;

    if let Some(variation) = variation {
        price = add_checked(&price, &variation.price)?;
    }

    for selected in add_ons {
        let extra = selected
            .add_on
            .price
            .try_multiply(selected.quantity)
            .ok_or(StorefrontError::Overflow)?;
        price = add_checked(&price, &extra)?;
    }

    if price.is_negative() {
        return Err(StorefrontError::NegativePrice(item.id.to_string()));
    }
    Ok(price)
}

fn add_checked(a: &Money, b: &Money) -> Result<Money, StorefrontError> {
    if a.currency != b.currency {
        return Err(StorefrontError::CurrencyMismatch {
            expected: a.currency.code().to_string(),
            got: b.currency.code().to_string(),
        });
    }
    a.try_add(b).ok_or(StorefrontError::Overflow)
}

/// Pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Sum of quantities.
    pub item_count: i64,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
}

impl CartPricing {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub cart_item_id: CartItemId,
    /// Price per unit, fixed when the line was added.
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price * quantity.
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AddOn;
    use crate::money::Currency;

    fn php(amount: i64) -> Money {
        Money::from_major(amount, Currency::PHP)
    }

    #[test]
    fn test_unit_price_with_variation_and_add_ons() {
        let item = MenuItem::new("bento", "Bento", php(150), "bento");
        let large = Variation::new("large", "Large", php(20));
        let add_ons = vec![
            SelectedAddOn::new(AddOn::new("egg", "Egg", php(10), "Extras"), 2),
            SelectedAddOn::new(AddOn::new("nori", "Nori", php(15), "Extras"), 1),
        ];

        let price = unit_price(&item, Some(&large), &add_ons).unwrap();
        assert_eq!(price, php(205));
    }

    #[test]
    fn test_unit_price_plain_item() {
        let item = MenuItem::new("tea", "Iced Tea", php(40), "drinks");
        assert_eq!(unit_price(&item, None, &[]).unwrap(), php(40));
    }

    #[test]
    fn test_unit_price_currency_mismatch() {
        let item = MenuItem::new("tea", "Iced Tea", php(40), "drinks");
        let usd = Variation::new("large", "Large", Money::from_major(1, Currency::USD));
        assert!(matches!(
            unit_price(&item, Some(&usd), &[]),
            Err(StorefrontError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_negative_unit_price_rejected() {
        let mut item = MenuItem::new("bento", "Bento", php(150), "bento");
        item.variations = vec![Variation::new("half", "Half", php(-200))];

        let result = unit_price(&item, Some(&item.variations[0]), &[]);
        assert!(matches!(result, Err(StorefrontError::NegativePrice(id)) if id == "bento"));

        // A negative delta is fine while the total stays at or above zero
        item.variations = vec![Variation::new("small", "Small", php(-30))];
        assert_eq!(unit_price(&item, Some(&item.variations[0]), &[]).unwrap(), php(120));
    }
}
