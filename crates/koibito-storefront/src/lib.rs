//! Menu, cart and checkout logic for the Koibito Maki House storefront.
//!
//! - **Catalog**: Menu items, variations, add-ons, categories, payment methods
//! - **Customization**: Variation and add-on selection with a live price
//! - **Cart**: Configured lines, merge-by-configuration, totals
//! - **Checkout**: Details/payment flow, delivery fees, order summary, hand-off
//! - **Source**: Read-only catalog fetching that degrades to empty lists
//!
//! # Example
//!
//! ```rust
//! use koibito_storefront::prelude::*;
//!
//! let tea = MenuItem::new("tea", "Iced Tea", Money::from_major(40, Currency::PHP), "drinks");
//!
//! let mut cart = Cart::default();
//! if let AddToCart::Direct(addition) = begin_add_to_cart(&tea) {
//!     addition.apply(&mut cart).unwrap();
//! }
//!
//! let mut checkout = CheckoutFlow::default();
//! checkout.details.name = "Aiko".to_string();
//! checkout.details.contact_number = "09171234567".to_string();
//! checkout.details.address = "12 Sampaguita St".to_string();
//! checkout.details.delivery_area = "montalban".to_string();
//! checkout.details.delivery_time = "6:30 PM".to_string();
//! checkout.proceed_to_payment().unwrap();
//!
//! let order = checkout.place_order(&cart, &[], &MessengerLink::default()).unwrap();
//! assert_eq!(order.summary.grand_total.whole_units(), 85);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customization;
pub mod source;

pub use error::StorefrontError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::StorefrontError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        AddOn, Category, Menu, MenuFilter, MenuItem, PaymentMethod, SiteSettings, Variation,
    };

    // Customization
    pub use crate::customization::{begin_add_to_cart, AddToCart, CartAddition, ItemCustomization};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartPricing, SelectedAddOn};

    // Checkout
    pub use crate::checkout::{
        compose_order_summary, delivery_fee, CheckoutFlow, CheckoutStep, CustomerDetails,
        DeliveryArea, LinkOpener, MessengerLink, OrderSummary, PlacedOrder,
    };

    // Source
    pub use crate::source::{
        CatalogDocument, CatalogSource, FileCatalogSource, Loadable, StaticCatalogSource,
        StorefrontSnapshot,
    };
}
