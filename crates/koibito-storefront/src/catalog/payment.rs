//! Payment methods offered at checkout.
//!
//! The storefront never processes payments. A method only tells the customer
//! where to send money and is echoed in the order summary.

use crate::ids::PaymentMethodId;
use serde::{Deserialize, Serialize};

/// Method id used when the catalog offers none.
pub const FALLBACK_PAYMENT_METHOD: &str = "gcash";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    /// Display name (e.g., "GCash").
    pub name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub account_name: String,
    /// QR code image for scan-to-pay.
    #[serde(default)]
    pub qr_code_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_active() -> bool {
    true
}

impl PaymentMethod {
    pub fn new(id: impl Into<PaymentMethodId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_number: String::new(),
            account_name: String::new(),
            qr_code_url: None,
            active: true,
            sort_order: 0,
        }
    }
}

/// Active methods in display order.
pub fn active_methods(methods: &[PaymentMethod]) -> Vec<&PaymentMethod> {
    let mut active: Vec<&PaymentMethod> = methods.iter().filter(|m| m.active).collect();
    active.sort_by_key(|m| m.sort_order);
    active
}

/// The method preselected at checkout: the first active one, or GCash.
pub fn default_method_id(methods: &[PaymentMethod]) -> PaymentMethodId {
    active_methods(methods)
        .first()
        .map(|m| m.id.clone())
        .unwrap_or_else(|| PaymentMethodId::new(FALLBACK_PAYMENT_METHOD))
}
