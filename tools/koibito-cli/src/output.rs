//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use koibito_storefront::catalog::MenuItem;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!(r#"{{"error": "{}"}}"#, msg.replace('"', "\\\""));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a step in a process.
    pub fn step(&self, num: usize, total: usize, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style(format!("[{}/{}]", num, total)).dim(), msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print preformatted text as-is.
    pub fn raw(&self, text: &str) {
        if self.json {
            return;
        }
        println!("{}", text);
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(template);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Price as shown on the menu card: the discounted price with the regular
/// one struck through, or just the regular price.
pub fn price_label(item: &MenuItem) -> String {
    if item.is_on_discount() {
        format!(
            "{} {}",
            item.effective_price().display_whole(),
            style(item.base_price.display_whole()).dim().strikethrough()
        )
    } else {
        item.base_price.display_whole()
    }
}

/// Badges for a menu item, in display order.
pub fn item_badges(item: &MenuItem) -> Vec<String> {
    let mut badges = Vec::new();
    if item.popular {
        badges.push(style("popular").yellow().to_string());
    }
    if let Some(percent) = item.discount_percentage() {
        badges.push(style(format!("-{:.0}%", percent)).green().to_string());
    }
    if !item.available {
        badges.push(style("sold out").dim().to_string());
    }
    badges
}

#[cfg(test)]
mod tests {
    use super::*;
    use koibito_storefront::{Currency, Money};

    fn php(amount: i64) -> Money {
        Money::from_major(amount, Currency::PHP)
    }

    #[test]
    fn test_item_badges() {
        let mut item = MenuItem::new("siomai", "Pork Siomai", php(100), "dim-sum");
        assert!(item_badges(&item).is_empty());

        item.popular = true;
        item.discount_price = Some(php(90));
        item.discount_active = true;
        item.available = false;
        let badges = item_badges(&item);
        assert_eq!(badges.len(), 3);
        assert!(badges[1].contains("-10%"));
        assert!(badges[2].contains("sold out"));
    }

    #[test]
    fn test_price_label_without_discount() {
        let item = MenuItem::new("tea", "Iced Tea", php(40), "drinks");
        assert_eq!(price_label(&item), "\u{20b1}40");
    }
}
