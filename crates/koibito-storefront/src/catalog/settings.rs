//! Site-wide settings read once at startup.

use crate::money::Currency;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SITE_NAME: &str = "Koibito Maki House";
pub const DEFAULT_SITE_LOGO: &str = "/logo.jpg";

/// Name left over from the template the site was built on.
const LEGACY_SITE_NAME: &str = "Ramen Yard";
const LEGACY_DISPLAY_NAME: &str = "KOIBITO";

/// Branding and currency for the storefront.
///
/// Every field is optional in the source data. Missing values fall back to
/// the Koibito defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SiteSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl SiteSettings {
    pub fn site_name(&self) -> &str {
        non_empty(&self.site_name).unwrap_or(DEFAULT_SITE_NAME)
    }

    /// Name shown in the header.
    pub fn display_name(&self) -> &str {
        match self.site_name() {
            LEGACY_SITE_NAME => LEGACY_DISPLAY_NAME,
            name => name,
        }
    }

    pub fn site_logo(&self) -> &str {
        non_empty(&self.site_logo).unwrap_or(DEFAULT_SITE_LOGO)
    }

    /// Configured currency, PHP when unset or unknown.
    pub fn currency(&self) -> Currency {
        self.currency
            .as_deref()
            .and_then(Currency::from_code)
            .unwrap_or_default()
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: SiteSettings) -> SiteSettings {
        SiteSettings {
            site_name: self.site_name.or(fallback.site_name),
            site_logo: self.site_logo.or(fallback.site_logo),
            site_description: self.site_description.or(fallback.site_description),
            currency: self.currency.or(fallback.currency),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SiteSettings::default();
        assert_eq!(settings.site_name(), DEFAULT_SITE_NAME);
        assert_eq!(settings.site_logo(), DEFAULT_SITE_LOGO);
        assert_eq!(settings.currency(), Currency::PHP);
    }

    #[test]
    fn test_legacy_name_is_rebranded() {
        let settings = SiteSettings {
            site_name: Some("Ramen Yard".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.display_name(), "KOIBITO");
        assert_eq!(settings.site_name(), "Ramen Yard");
    }

    #[test]
    fn test_empty_logo_falls_back() {
        let settings = SiteSettings {
            site_logo: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(settings.site_logo(), DEFAULT_SITE_LOGO);
    }

    #[test]
    fn test_or_prefers_self() {
        let local = SiteSettings {
            site_name: Some("Koibito Cainta".to_string()),
            ..Default::default()
        };
        let remote = SiteSettings {
            site_name: Some("Koibito".to_string()),
            currency: Some("USD".to_string()),
            ..Default::default()
        };
        let merged = local.or(remote);
        assert_eq!(merged.site_name(), "Koibito Cainta");
        assert_eq!(merged.currency(), Currency::USD);
    }
}
