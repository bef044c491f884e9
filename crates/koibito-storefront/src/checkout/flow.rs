//! Two-step checkout: customer details, then payment.

use crate::cart::Cart;
use crate::catalog::{default_method_id, PaymentMethod};
use crate::checkout::{compose_order_summary, CustomerDetails, LinkOpener, MessengerLink, OrderSummary};
use crate::ids::PaymentMethodId;
use crate::StorefrontError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStep {
    /// Customer details form.
    #[default]
    Details,
    /// Payment method choice and order placement.
    Payment,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Details => "details",
            CheckoutStep::Payment => "payment",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Details => "Order Details",
            CheckoutStep::Payment => "Payment",
        }
    }
}

/// Checkout flow state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutFlow {
    /// Current step.
    pub step: CheckoutStep,
    /// Details entered so far.
    pub details: CustomerDetails,
    /// Selected payment method.
    pub payment_method: PaymentMethodId,
}

/// A composed order, ready to hand off.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedOrder {
    pub summary: OrderSummary,
    /// Rendered summary text.
    pub message: String,
    /// Pre-filled messenger link.
    pub uri: String,
}

impl PlacedOrder {
    /// Open the messenger link. Nothing is reported back.
    pub fn hand_off(&self, opener: &dyn LinkOpener) {
        info!(
            lines = self.summary.lines.len(),
            grand_total = %self.summary.grand_total,
            "handing order off to messenger"
        );
        opener.open(&self.uri);
    }
}

impl CheckoutFlow {
    /// Start checkout, preselecting the first active payment method.
    pub fn new(payment_methods: &[PaymentMethod]) -> Self {
        Self {
            step: CheckoutStep::Details,
            details: CustomerDetails::default(),
            payment_method: default_method_id(payment_methods),
        }
    }

    /// Whether the details step is filled in enough to continue.
    pub fn can_proceed_to_payment(&self) -> bool {
        self.details.is_complete()
    }

    /// Move from details to payment.
    pub fn proceed_to_payment(&mut self) -> Result<CheckoutStep, StorefrontError> {
        if self.step != CheckoutStep::Details {
            return Err(StorefrontError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: CheckoutStep::Payment.as_str().to_string(),
            });
        }

        let missing = self.details.missing_fields();
        if !missing.is_empty() {
            return Err(StorefrontError::CheckoutIncomplete(missing.join(", ")));
        }

        self.step = CheckoutStep::Payment;
        debug!(step = self.step.as_str(), "checkout advanced");
        Ok(self.step)
    }

    /// Return to the details step. Safe to call from either step.
    pub fn back_to_details(&mut self) -> CheckoutStep {
        self.step = CheckoutStep::Details;
        debug!(step = self.step.as_str(), "checkout went back");
        self.step
    }

    pub fn select_payment_method(&mut self, id: impl Into<PaymentMethodId>) {
        self.payment_method = id.into();
    }

    /// Display name of the selected method, or its id when the catalog does
    /// not know it.
    pub fn payment_method_name(&self, payment_methods: &[PaymentMethod]) -> String {
        payment_methods
            .iter()
            .find(|m| m.id == self.payment_method)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| self.payment_method.to_string())
    }

    /// Compose the order from the payment step.
    ///
    /// The flow stays on the payment step afterwards; placing again composes
    /// the same order.
    pub fn place_order(
        &self,
        cart: &Cart,
        payment_methods: &[PaymentMethod],
        link: &MessengerLink,
    ) -> Result<PlacedOrder, StorefrontError> {
        if self.step != CheckoutStep::Payment {
            return Err(StorefrontError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: "place order".to_string(),
            });
        }
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        let missing = self.details.missing_fields();
        if !missing.is_empty() {
            return Err(StorefrontError::CheckoutIncomplete(missing.join(", ")));
        }

        let summary = compose_order_summary(
            cart,
            &self.details,
            &self.payment_method_name(payment_methods),
        )?;
        let message = summary.to_message();
        let uri = link.uri_for(&message);

        Ok(PlacedOrder {
            summary,
            message,
            uri,
        })
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new(&[])
    }
}
