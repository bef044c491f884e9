//! The human-readable order summary sent to the restaurant.

use crate::cart::Cart;
use crate::checkout::{delivery_fee, CustomerDetails, DeliveryArea};
use crate::money::Money;
use crate::StorefrontError;
use serde::{Deserialize, Serialize};

/// One cart line as it appears in the summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryLine {
    pub name: String,
    pub variation: Option<String>,
    pub add_ons: Vec<String>,
    pub quantity: i64,
    pub line_total: Money,
}

impl SummaryLine {
    /// "• Bento (Large) + Egg x2, Nori x1 - ₱205". The trailing count is the
    /// line quantity.
    pub fn render(&self) -> String {
        let mut line = format!("\u{2022} {}", self.name);
        if let Some(variation) = &self.variation {
            line.push_str(&format!(" ({})", variation));
        }
        if !self.add_ons.is_empty() {
            line.push_str(&format!(" + {}", self.add_ons.join(", ")));
        }
        line.push_str(&format!(
            " x{} - {}",
            self.quantity,
            self.line_total.display_whole()
        ));
        line
    }
}

/// Everything the restaurant needs to confirm an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    pub customer: CustomerDetails,
    pub lines: Vec<SummaryLine>,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub grand_total: Money,
    /// Payment method display name.
    pub payment_method: String,
}

/// Build the summary for a cart snapshot.
///
/// The delivery fee comes from the customer's delivery area. Unknown areas
/// add nothing.
pub fn compose_order_summary(
    cart: &Cart,
    customer: &CustomerDetails,
    payment_method: &str,
) -> Result<OrderSummary, StorefrontError> {
    let lines = cart
        .items
        .iter()
        .map(|item| {
            Ok(SummaryLine {
                name: item.name.clone(),
                variation: item.selected_variation.as_ref().map(|v| v.name.clone()),
                add_ons: item.selected_add_ons.iter().map(|a| a.label()).collect(),
                quantity: item.quantity,
                line_total: item.line_total()?,
            })
        })
        .collect::<Result<Vec<_>, StorefrontError>>()?;

    let subtotal = cart.total_price()?;
    let delivery_fee = delivery_fee(&customer.delivery_area, cart.currency);
    let grand_total = subtotal
        .try_add(&delivery_fee)
        .ok_or(StorefrontError::Overflow)?;

    Ok(OrderSummary {
        customer: customer.clone(),
        lines,
        subtotal,
        delivery_fee,
        grand_total,
        payment_method: payment_method.to_string(),
    })
}

impl OrderSummary {
    fn delivery_area_label(&self) -> String {
        match DeliveryArea::from_slug(&self.customer.delivery_area) {
            Some(area) => area.label(self.delivery_fee.currency),
            None => format!(
                "{} ({})",
                self.customer.delivery_area,
                self.delivery_fee.display_whole()
            ),
        }
    }

    /// Render the message pasted into the restaurant's chat.
    pub fn to_message(&self) -> String {
        let customer = &self.customer;

        let mut address = customer.address.clone();
        if !customer.landmark.is_empty() {
            address.push_str(&format!("\n\u{1f5fa}\u{fe0f} Landmark: {}", customer.landmark));
        }

        let lines = self
            .lines
            .iter()
            .map(SummaryLine::render)
            .collect::<Vec<_>>()
            .join("\n");

        let notes = if customer.notes.is_empty() {
            String::new()
        } else {
            format!("\u{1f4dd} Notes: {}", customer.notes)
        };

        let message = format!(
            "\u{1f6d2} KOIBITO ORDER\n\
             \n\
             \u{1f464} Customer: {name}\n\
             \u{1f4de} Contact: {contact}\n\
             \u{1f4cd} Service: Delivery\n\
             \u{1f3e0} Address: {address}\n\
             \u{1f552} Time: {time}\n\
             \n\
             \n\
             \u{1f4cb} ORDER DETAILS:\n\
             {lines}\n\
             \n\
             \u{1f4b0} ITEMS TOTAL: {subtotal}\n\
             \u{1f6f5} DELIVERY AREA: {area}\n\
             \u{1f4b0} GRAND TOTAL: {grand_total}\n\
             \n\
             \u{1f4b3} Payment: {payment}\n\
             \u{1f4f8} Payment Screenshot: Please attach your payment receipt screenshot\n\
             \n\
             {notes}\n\
             \n\
             Please confirm this order to proceed. Thank you for choosing KOIBITO! \u{1f371}",
            name = customer.name,
            contact = customer.contact_number,
            address = address,
            time = customer.delivery_time,
            lines = lines,
            subtotal = self.subtotal.display_whole(),
            area = self.delivery_area_label(),
            grand_total = self.grand_total.display_whole(),
            payment = self.payment_method,
            notes = notes,
        );

        message.trim().to_string()
    }
}
