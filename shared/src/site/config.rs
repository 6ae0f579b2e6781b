//! Site configuration

use serde::{Deserialize, Serialize};

/// Storefront configuration
///
/// Holds the seed it was built from so `reset` can restore it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    pub site_name: String,
    /// ISO 4217 code shown in the catalog
    pub currency: String,
    pub contact_email: Option<String>,
    /// Whether the public catalog is reachable
    pub catalog_enabled: bool,
    #[serde(skip)]
    seed: Option<Box<SiteConfig>>,
}

/// Partial update, `None` keeps the current value
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfigUpdate {
    pub site_name: Option<String>,
    pub currency: Option<String>,
    pub contact_email: Option<String>,
    pub catalog_enabled: Option<bool>,
}

impl SiteConfig {
    pub fn new(
        site_name: impl Into<String>,
        currency: impl Into<String>,
        contact_email: Option<String>,
    ) -> Self {
        let mut config = Self {
            site_name: site_name.into(),
            currency: currency.into(),
            contact_email,
            catalog_enabled: true,
            seed: None,
        };
        config.seed = Some(Box::new(config.clone()));
        config
    }

    /// Apply a patch
    pub fn update(&mut self, patch: SiteConfigUpdate) {
        if let Some(name) = patch.site_name {
            self.site_name = name;
        }
        if let Some(currency) = patch.currency {
            self.currency = currency.to_uppercase();
        }
        if let Some(email) = patch.contact_email {
            self.contact_email = if email.trim().is_empty() {
                None
            } else {
                Some(email)
            };
        }
        if let Some(enabled) = patch.catalog_enabled {
            self.catalog_enabled = enabled;
        }
    }

    /// Restore the values this config was created with
    pub fn reset(&mut self) {
        if let Some(seed) = self.seed.take() {
            let mut restored = (*seed).clone();
            restored.seed = Some(seed);
            *self = restored;
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new("Workshop", "EUR", None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_then_reset() {
        let mut config = SiteConfig::new("Acme Fabrication", "USD", None);
        config.update(SiteConfigUpdate {
            site_name: Some("Acme".into()),
            currency: Some("eur".into()),
            contact_email: Some("sales@acme.test".into()),
            catalog_enabled: Some(false),
        });
        assert_eq!(config.site_name, "Acme");
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.contact_email.as_deref(), Some("sales@acme.test"));
        assert!(!config.catalog_enabled);

        config.reset();
        assert_eq!(config, SiteConfig::new("Acme Fabrication", "USD", None));

        // reset is repeatable
        config.update(SiteConfigUpdate {
            site_name: Some("Other".into()),
            ..Default::default()
        });
        config.reset();
        assert_eq!(config.site_name, "Acme Fabrication");
    }

    #[test]
    fn test_blank_email_clears() {
        let mut config = SiteConfig::new("A", "EUR", Some("a@b.test".into()));
        config.update(SiteConfigUpdate {
            contact_email: Some("  ".into()),
            ..Default::default()
        });
        assert_eq!(config.contact_email, None);
    }

    #[test]
    fn test_serialize_skips_seed() {
        let json = serde_json::to_value(SiteConfig::default()).unwrap();
        assert!(json.get("seed").is_none());
        assert_eq!(json["currency"], "EUR");
    }
}
