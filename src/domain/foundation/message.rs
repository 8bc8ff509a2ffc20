//! User-facing message shown when an answer is not understood.

use serde::{Deserialize, Serialize};

/// Either a literal text or a key resolved by a localization service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidResponseMessage {
    Literal(String),
    #[serde(rename = "i18n_key")]
    LocalizedKey(String),
}

impl InvalidResponseMessage {
    pub fn literal(text: impl Into<String>) -> Self {
        InvalidResponseMessage::Literal(text.into())
    }

    pub fn localized(key: impl Into<String>) -> Self {
        InvalidResponseMessage::LocalizedKey(key.into())
    }

    /// Resolves the message, calling `localize` only for localized keys.
    pub fn resolve(&self, localize: impl FnOnce(&str) -> String) -> String {
        match self {
            InvalidResponseMessage::Literal(text) => text.clone(),
            InvalidResponseMessage::LocalizedKey(key) => localize(key),
        }
    }
}

impl Default for InvalidResponseMessage {
    fn default() -> Self {
        InvalidResponseMessage::Literal("Sorry, I did not understand your answer.".to_string())
    }
}
