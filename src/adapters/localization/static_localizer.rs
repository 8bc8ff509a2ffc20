//! Localizer backed by message bundles held in memory.

use std::collections::HashMap;

use crate::domain::foundation::Locale;
use crate::ports::Localizer;

/// Message bundles keyed by locale tag, then message key.
///
/// Lookup order: exact locale tag, its language subtag, the default locale,
/// and finally the key itself so a missing translation is visible rather
/// than blank.
#[derive(Debug, Clone, Default)]
pub struct StaticLocalizer {
    default_locale: Locale,
    bundles: HashMap<String, HashMap<String, String>>,
}

impl StaticLocalizer {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            bundles: HashMap::new(),
        }
    }

    /// Builds a localizer from `locale → key → message` bundles.
    pub fn from_bundles(
        default_locale: Locale,
        bundles: HashMap<String, HashMap<String, String>>,
    ) -> Self {
        Self {
            default_locale,
            bundles,
        }
    }

    pub fn with_message(
        mut self,
        locale: &str,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.bundles
            .entry(locale.to_string())
            .or_default()
            .insert(key.into(), message.into());
        self
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        self.bundles
            .get(locale)
            .and_then(|bundle| bundle.get(key))
            .map(String::as_str)
    }
}

impl Localizer for StaticLocalizer {
    fn localize(&self, key: &str, locale: &Locale) -> String {
        self.lookup(locale.as_str(), key)
            .or_else(|| self.lookup(locale.language(), key))
            .or_else(|| self.lookup(self.default_locale.as_str(), key))
            .unwrap_or(key)
            .to_string()
    }
}
