//! Delivery areas and their fixed fees.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A named delivery zone with a fixed fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryArea {
    Montalban,
    SanMateo,
}

impl DeliveryArea {
    pub const ALL: [DeliveryArea; 2] = [DeliveryArea::Montalban, DeliveryArea::SanMateo];

    /// Form value (e.g., "san-mateo").
    pub fn slug(&self) -> &'static str {
        match self {
            DeliveryArea::Montalban => "montalban",
            DeliveryArea::SanMateo => "san-mateo",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryArea::Montalban => "Montalban",
            DeliveryArea::SanMateo => "San Mateo",
        }
    }

    /// Fee in whole currency units.
    pub fn fee_units(&self) -> i64 {
        match self {
            DeliveryArea::Montalban => 45,
            DeliveryArea::SanMateo => 70,
        }
    }

    pub fn fee(&self, currency: Currency) -> Money {
        Money::from_major(self.fee_units(), currency)
    }

    /// Parse a form value. Unknown values yield None.
    pub fn from_slug(slug: &str) -> Option<Self> {
        DeliveryArea::ALL.into_iter().find(|a| a.slug() == slug)
    }

    /// "Montalban (₱45)".
    pub fn label(&self, currency: Currency) -> String {
        format!(
            "{} ({})",
            self.display_name(),
            self.fee(currency).display_whole()
        )
    }
}

/// Fee for a delivery area form value. Unset or unrecognized areas cost
/// nothing.
pub fn delivery_fee(area: &str, currency: Currency) -> Money {
    DeliveryArea::from_slug(area)
        .map(|a| a.fee(currency))
        .unwrap_or_else(|| Money::zero(currency))
}
