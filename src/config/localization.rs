//! Localized message configuration

use serde::Deserialize;
use std::collections::HashMap;

use super::error::ValidationError;
use crate::adapters::StaticLocalizer;
use crate::domain::foundation::Locale;

/// Message bundles for localized prompts
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizationConfig {
    /// Locale used when a message is missing for the requested one
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Locale tag -> message key -> text
    #[serde(default)]
    pub messages: HashMap<String, HashMap<String, String>>,
}

impl LocalizationConfig {
    /// Build the in-memory localizer from the configured bundles
    pub fn localizer(&self) -> StaticLocalizer {
        StaticLocalizer::from_bundles(
            Locale::new(self.default_locale.clone()),
            self.messages.clone(),
        )
    }

    /// Validate localization configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_locale.is_empty() {
            return Err(ValidationError::EmptyDefaultLocale);
        }
        Ok(())
    }
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            messages: HashMap::new(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}
