//! Place an order from an order file and hand it off to Messenger.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Input, Select};
use koibito_storefront::cart::Cart;
use koibito_storefront::catalog::{active_methods, Menu, PaymentMethod};
use koibito_storefront::checkout::{
    CheckoutFlow, CheckoutStep, CustomerDetails, DeliveryArea, LinkOpener,
};
use koibito_storefront::customization::{begin_add_to_cart, AddToCart};
use koibito_storefront::{AddOnId, Currency, MenuItemId, VariationId};
use serde::Deserialize;
use tracing::debug;

use super::OrderArgs;
use crate::context::Context;
use crate::output::Output;

/// An order as written by the customer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderFile {
    #[serde(default)]
    pub customer: CustomerDetails,

    /// Payment method ID. Defaults to the first active method.
    #[serde(default)]
    pub payment_method: Option<String>,

    #[serde(default)]
    pub lines: Vec<OrderLine>,
}

/// One cart line in an order file.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLine {
    /// Menu item ID.
    pub item: String,

    #[serde(default = "default_quantity")]
    pub quantity: i64,

    /// Variation ID. The item's first variation when omitted.
    #[serde(default)]
    pub variation: Option<String>,

    /// Add-on ID to units per item.
    #[serde(default)]
    pub add_ons: BTreeMap<String, i64>,
}

fn default_quantity() -> i64 {
    1
}

impl OrderFile {
    /// Load an order file, JSON when the extension says so.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read order file: {}", path.display()))?;

        if path.extension().map_or(false, |e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON order: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML order: {}", path.display()))
        }
    }
}

/// Prints the hand-off link for the customer to open.
struct TerminalOpener<'a> {
    output: &'a Output,
}

impl LinkOpener for TerminalOpener<'_> {
    fn open(&self, uri: &str) {
        self.output.success("Open this link to send your order on Messenger:");
        self.output.raw(uri);
    }
}

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let order = OrderFile::load(&ctx.resolve_path(&args.file))?;
    let interactive = !args.yes && !ctx.output.is_json() && console::user_attended();

    let snapshot = ctx.load_snapshot().await;
    let menu = snapshot.menu();
    if menu.is_empty() {
        bail!("No menu available from {}", ctx.catalog_path().display());
    }

    let cart = build_cart(&menu, &order.lines, ctx.config.currency())?;
    if cart.is_empty() {
        bail!("Order file has no lines");
    }
    debug!(lines = cart.items.len(), items = cart.item_count(), "cart built");

    let methods = &snapshot.payment_methods.items;
    let mut checkout = CheckoutFlow::new(methods);
    checkout.details = order.customer;

    // Step 1: Customer details
    ctx.output.step(1, 2, CheckoutStep::Details.display_name());
    if !checkout.can_proceed_to_payment() && interactive {
        prompt_missing_details(&mut checkout.details, cart.currency)?;
    }
    checkout.proceed_to_payment()?;

    // Step 2: Payment
    ctx.output.step(2, 2, CheckoutStep::Payment.display_name());
    match args.payment.or(order.payment_method) {
        Some(method) => checkout.select_payment_method(method),
        None if interactive => {
            if let Some(method) = prompt_payment_method(methods)? {
                checkout.select_payment_method(method.id.clone());
            }
        }
        None => {}
    }
    if let Some(method) = methods.iter().find(|m| m.id == checkout.payment_method) {
        show_payment_instructions(&ctx.output, method);
    }

    let placed = checkout.place_order(&cart, methods, &ctx.config.messenger_link())?;

    if ctx.output.is_json() {
        ctx.output.json(&placed);
        return Ok(());
    }

    ctx.output.header("Order Summary");
    ctx.output.raw(&placed.message);
    ctx.output.raw("");

    if interactive {
        let confirmed = Confirm::new()
            .with_prompt("Send this order via Messenger?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Order not sent");
            return Ok(());
        }
    }

    placed.hand_off(&TerminalOpener {
        output: &ctx.output,
    });

    Ok(())
}

/// Fill a cart from order lines, customizing items that have options.
pub fn build_cart(menu: &Menu, lines: &[OrderLine], currency: Currency) -> Result<Cart> {
    let mut cart = Cart::new(currency);

    for line in lines {
        let item = menu.item(&MenuItemId::new(line.item.as_str()))?;

        let mut addition = match begin_add_to_cart(item) {
            AddToCart::Direct(addition) => {
                if line.variation.is_some() || !line.add_ons.is_empty() {
                    bail!("{} has no options to choose", item.name);
                }
                addition
            }
            AddToCart::Customize(mut session) => {
                if let Some(variation) = &line.variation {
                    session.select_variation(&VariationId::new(variation.as_str()))?;
                }
                for (add_on, quantity) in &line.add_ons {
                    session.set_add_on_quantity(&AddOnId::new(add_on.as_str()), *quantity)?;
                }
                debug!(item = %item.id, price = %session.compute_price()?, "item customized");
                session.confirm()
            }
        };

        addition.quantity = line.quantity;
        addition.apply(&mut cart)?;
    }

    Ok(cart)
}

fn prompt_missing_details(details: &mut CustomerDetails, currency: Currency) -> Result<()> {
    for field in details.missing_fields() {
        if field == "delivery area" {
            let labels: Vec<String> = DeliveryArea::ALL
                .iter()
                .map(|area| area.label(currency))
                .collect();
            let selection = Select::new()
                .with_prompt("Delivery area")
                .items(&labels)
                .default(0)
                .interact()?;
            details.delivery_area = DeliveryArea::ALL[selection].slug().to_string();
            continue;
        }

        let slot = match field {
            "name" => &mut details.name,
            "contact number" => &mut details.contact_number,
            "address" => &mut details.address,
            "delivery time" => &mut details.delivery_time,
            _ => continue,
        };
        *slot = Input::<String>::new()
            .with_prompt(capitalize(field))
            .interact_text()?;
    }
    Ok(())
}

fn prompt_payment_method(methods: &[PaymentMethod]) -> Result<Option<&PaymentMethod>> {
    let active = active_methods(methods);
    if active.len() < 2 {
        return Ok(active.first().copied());
    }

    let names: Vec<&str> = active.iter().map(|m| m.name.as_str()).collect();
    let selection = Select::new()
        .with_prompt("Payment method")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(Some(active[selection]))
}

fn show_payment_instructions(output: &Output, method: &PaymentMethod) {
    output.kv("Payment", &method.name);
    if !method.account_name.is_empty() {
        output.kv("Account name", &method.account_name);
    }
    if !method.account_number.is_empty() {
        output.kv("Account number", &method.account_number);
    }
    if let Some(qr) = &method.qr_code_url {
        output.kv("QR code", qr);
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use koibito_storefront::catalog::{AddOn, Category, MenuItem, Variation};
    use koibito_storefront::Money;

    fn php(amount: i64) -> Money {
        Money::from_major(amount, Currency::PHP)
    }

    fn menu() -> Menu {
        let mut ramen = MenuItem::new("tonkotsu", "Tonkotsu Ramen", php(150), "ramen");
        ramen.variations = vec![
            Variation::new("regular", "Regular", php(0)),
            Variation::new("large", "Large", php(20)),
        ];
        ramen.add_ons = vec![AddOn::new("egg", "Ajitama Egg", php(10), "Toppings")];
        let tea = MenuItem::new("tea", "Iced Tea", php(40), "drinks");

        Menu::new(
            vec![
                Category::new("ramen", "Ramen", "🍜"),
                Category::new("drinks", "Drinks", "🥤"),
            ],
            vec![ramen, tea],
        )
    }

    const ORDER: &str = r#"
payment_method = "maya"

[customer]
name = "Aiko Santos"
contact_number = "09171234567"
address = "12 Sampaguita St"
delivery_area = "montalban"
delivery_time = "7:00 PM"

[[lines]]
item = "tonkotsu"
variation = "large"
add_ons = { egg = 2 }
quantity = 2

[[lines]]
item = "tea"
"#;

    #[test]
    fn test_order_file_parses() {
        let order: OrderFile = toml::from_str(ORDER).unwrap();
        assert_eq!(order.payment_method.as_deref(), Some("maya"));
        assert!(order.customer.is_complete());
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[1].quantity, 1);
        assert_eq!(order.lines[0].add_ons.get("egg"), Some(&2));
    }

    #[test]
    fn test_build_cart() {
        let order: OrderFile = toml::from_str(ORDER).unwrap();
        let cart = build_cart(&menu(), &order.lines, Currency::PHP).unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 2);
        // (150 + 20 + 2 * 10) * 2 + 40
        assert_eq!(cart.total_price().unwrap(), php(420));
    }

    #[test]
    fn test_default_variation_applies() {
        let lines = vec![OrderLine {
            item: "tonkotsu".to_string(),
            quantity: 1,
            variation: None,
            add_ons: BTreeMap::new(),
        }];
        let cart = build_cart(&menu(), &lines, Currency::PHP).unwrap();
        let variation = cart.items[0].selected_variation.as_ref().unwrap();
        assert_eq!(variation.id.as_str(), "regular");
    }

    #[test]
    fn test_options_on_plain_item_rejected() {
        let lines = vec![OrderLine {
            item: "tea".to_string(),
            quantity: 1,
            variation: Some("large".to_string()),
            add_ons: BTreeMap::new(),
        }];
        assert!(build_cart(&menu(), &lines, Currency::PHP).is_err());
    }

    #[test]
    fn test_unknown_item_rejected() {
        let lines = vec![OrderLine {
            item: "gyoza".to_string(),
            quantity: 1,
            variation: None,
            add_ons: BTreeMap::new(),
        }];
        let err = build_cart(&menu(), &lines, Currency::PHP).unwrap_err();
        assert!(err.to_string().contains("gyoza"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("contact number"), "Contact number");
        assert_eq!(capitalize(""), "");
    }
}
