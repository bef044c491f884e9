//! Show one menu item with its options.

use anyhow::Result;
use koibito_storefront::catalog::{MenuItem, Variation};
use koibito_storefront::MenuItemId;

use super::ItemArgs;
use crate::context::Context;
use crate::output::{item_badges, price_label};

/// Run the item command.
pub async fn run(args: ItemArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot().await;
    let menu = snapshot.menu();
    let item = menu.item(&MenuItemId::new(args.id))?;

    if ctx.output.is_json() {
        ctx.output.json(item);
        return Ok(());
    }

    ctx.output.header(&item.name);
    if !item.description.is_empty() {
        ctx.output.info(&item.description);
    }
    ctx.output.kv("Price", &price_label(item));
    let badges = item_badges(item);
    if !badges.is_empty() {
        ctx.output.kv("Tags", &badges.join(" "));
    }
    ctx.output.kv("Image", item.image_or_placeholder());

    if !item.variations.is_empty() {
        ctx.output.header("Options");
        for variation in &item.variations {
            ctx.output.list_item(&variation_line(item, variation));
        }
    }

    for (group, add_ons) in item.grouped_add_ons() {
        ctx.output.header(group);
        for add_on in add_ons {
            ctx.output
                .list_item(&format!("{} (+{})", add_on.name, add_on.price.display_whole()));
        }
    }

    Ok(())
}

/// "Large (+₱20)", with "(default)" on the preselected one.
fn variation_line(item: &MenuItem, variation: &Variation) -> String {
    let mut line = variation.name.clone();
    if !variation.price.is_zero() {
        line.push_str(&format!(" (+{})", variation.price.display_whole()));
    }
    if item.default_variation() == Some(variation) {
        line.push_str(" (default)");
    }
    line
}
