//! Checkout module.
//!
//! Contains the details/payment flow, delivery fees, the order summary and
//! the messenger hand-off.

mod delivery;
mod details;
mod flow;
mod handoff;
mod summary;

pub use delivery::{delivery_fee, DeliveryArea};
pub use details::CustomerDetails;
pub use flow::{CheckoutFlow, CheckoutStep, PlacedOrder};
pub use handoff::{encode_uri_component, LinkOpener, MessengerLink, DEFAULT_MESSENGER_PAGE_ID};
pub use summary::{compose_order_summary, OrderSummary, SummaryLine};
