//! Menu catalog module.
//!
//! Contains types for menu items, categories, payment methods and site
//! settings.

mod category;
mod item;
mod menu;
mod payment;
mod settings;

pub use category::Category;
pub use item::{AddOn, MenuItem, Variation, PLACEHOLDER_IMAGE};
pub use menu::{Menu, MenuFilter, PREFERRED_CATEGORY};
pub use payment::{active_methods, default_method_id, PaymentMethod, FALLBACK_PAYMENT_METHOD};
pub use settings::{SiteSettings, DEFAULT_SITE_LOGO, DEFAULT_SITE_NAME};
