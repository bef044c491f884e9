//! Shopping cart module.
//!
//! Contains the cart store, add-on selections and pricing.

mod cart;
mod pricing;
mod selection;

pub use cart::{Cart, CartItem, MAX_QUANTITY_PER_ITEM};
pub use pricing::{unit_price, CartPricing, LinePricing};
pub use selection::{collapse_add_ons, expand_add_ons, ConfigurationKey, SelectedAddOn};
