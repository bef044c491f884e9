//! Browse the menu.

use anyhow::Result;
use koibito_storefront::catalog::{Category, Menu, MenuFilter, MenuItem};
use koibito_storefront::CategoryId;
use serde::Serialize;

use super::MenuArgs;
use crate::context::Context;
use crate::output::{item_badges, price_label};

#[derive(Serialize)]
struct Section<'a> {
    category: &'a Category,
    items: Vec<&'a MenuItem>,
}

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot().await;
    let menu = snapshot.menu();

    if menu.is_empty() {
        ctx.output.warn(&format!(
            "No menu items found in {}",
            ctx.catalog_path().display()
        ));
    }

    if let Some(category) = args.category.as_deref().filter(|_| !menu.is_empty()) {
        menu.category(&CategoryId::new(category))?;
    }

    let filters = filters_for(&args);
    let sections = filtered_sections(&menu, &filters);

    if ctx.output.is_json() {
        ctx.output.json(&sections);
        return Ok(());
    }

    ctx.output.header(snapshot.site_settings.display_name());
    if let Some(description) = &snapshot.site_settings.site_description {
        ctx.output.info(description);
    }

    if sections.is_empty() && !menu.is_empty() {
        ctx.output.info("No items match.");
        return Ok(());
    }

    for section in &sections {
        ctx.output.header(&section.category.heading());
        for item in &section.items {
            let badges = item_badges(item).join(" ");
            ctx.output.table_row(
                &[item.id.as_str(), &item.name, &price_label(item), &badges],
                &[16, 28, 12, 0],
            );
        }
    }

    Ok(())
}

fn filters_for(args: &MenuArgs) -> Vec<MenuFilter> {
    let mut filters = Vec::new();
    if let Some(category) = &args.category {
        filters.push(MenuFilter::category(category.as_str()));
    }
    if args.popular {
        filters.push(MenuFilter::Popular);
    }
    if args.available {
        filters.push(MenuFilter::Available);
    }
    if let Some(query) = &args.search {
        filters.push(MenuFilter::text(query.as_str()));
    }
    filters
}

/// Visible sections with only the matching items, dropping empty ones.
fn filtered_sections<'a>(menu: &'a Menu, filters: &[MenuFilter]) -> Vec<Section<'a>> {
    menu.sections()
        .into_iter()
        .map(|(category, items)| Section {
            category,
            items: items
                .into_iter()
                .filter(|item| filters.iter().all(|f| f.matches(item)))
                .collect(),
        })
        .filter(|section| !section.items.is_empty())
        .collect()
}
