//! Storefront error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Menu item not found.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// Variation not offered by the item.
    #[error("Variation not found: {0}")]
    VariationNotFound(String),

    /// Add-on not offered by the item.
    #[error("Add-on not found: {0}")]
    AddOnNotFound(String),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Item is marked unavailable.
    #[error("Menu item is unavailable: {0}")]
    ItemUnavailable(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Checkout details incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Cart has nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// A price or price delta below zero.
    #[error("Negative price for menu item: {0}")]
    NegativePrice(String),

    /// Catalog could not be read.
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for StorefrontError {
    fn from(e: serde_json::Error) -> Self {
        StorefrontError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for StorefrontError {
    fn from(e: toml::de::Error) -> Self {
        StorefrontError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for StorefrontError {
    fn from(e: std::io::Error) -> Self {
        StorefrontError::CatalogLoad(e.to_string())
    }
}
