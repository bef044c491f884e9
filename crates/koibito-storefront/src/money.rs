//! Money type for menu prices and order totals.
//!
//! Amounts are integer minor units (centavos for PHP), so price deltas from
//! variations and add-ons sum exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    PHP,
    USD,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "PHP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::PHP => "PHP",
            Currency::USD => "USD",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "₱").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::PHP => "\u{20b1}",
            Currency::USD => "$",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "PHP" => Some(Currency::PHP),
            "USD" => Some(Currency::USD),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from whole currency units.
    ///
    /// ```
    /// use koibito_storefront::money::{Currency, Money};
    /// let price = Money::from_major(150, Currency::PHP);
    /// assert_eq!(price.amount_cents, 15000);
    /// ```
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount * currency.minor_per_major(), currency)
    }

    /// Create a Money value from a decimal amount.
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_per_major() as f64
    }

    /// Whole currency units, truncating any fraction.
    pub fn whole_units(&self) -> i64 {
        self.amount_cents / self.currency.minor_per_major()
    }

    /// Format with decimals (e.g., "₱205.00").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), self.to_decimal())
    }

    /// Format truncated to whole units (e.g., "₱205").
    pub fn display_whole(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.whole_units())
    }

    /// Try to add another Money value.
    ///
    /// Returns None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Try to multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values.
    ///
    /// Returns None on currency mismatch or overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics on currency mismatch or overflow. Use `try_add` otherwise.
    fn add(self, other: Money) -> Money {
        self.try_add(&other)
            .expect("Currency mismatch or overflow in addition")
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.try_multiply(factor)
            .expect("Overflow in multiplication")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_major() {
        let m = Money::from_major(150, Currency::PHP);
        assert_eq!(m.amount_cents, 15000);

        let m = Money::from_major(100, Currency::JPY);
        assert_eq!(m.amount_cents, 100);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::PHP);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(20550, Currency::PHP);
        assert_eq!(m.display(), "\u{20b1}205.50");
        assert_eq!(m.display_whole(), "\u{20b1}205");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::from_major(150, Currency::PHP);
        let b = Money::from_major(20, Currency::PHP);
        assert_eq!((a + b).whole_units(), 170);
    }

    #[test]
    fn test_try_add_currency_mismatch() {
        let php = Money::from_major(10, Currency::PHP);
        let usd = Money::from_major(10, Currency::USD);
        assert_eq!(php.try_add(&usd), None);
    }

    #[test]
    fn test_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::PHP);
        assert_eq!(m.try_multiply(2), None);
        assert_eq!(m.try_multiply(1), Some(m));
    }

    #[test]
    fn test_try_sum() {
        let values = [
            Money::from_major(100, Currency::PHP),
            Money::from_major(50, Currency::PHP),
        ];
        let total = Money::try_sum(values.iter(), Currency::PHP).unwrap();
        assert_eq!(total.whole_units(), 150);

        let mixed = [
            Money::from_major(100, Currency::PHP),
            Money::from_major(1, Currency::USD),
        ];
        assert_eq!(Money::try_sum(mixed.iter(), Currency::PHP), None);
        assert_eq!(
            Money::try_sum(std::iter::empty(), Currency::PHP),
            Some(Money::zero(Currency::PHP))
        );
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("php"), Some(Currency::PHP));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
