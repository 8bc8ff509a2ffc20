//! Locale value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language tag used to resolve localized messages (e.g. `fr`, `en-US`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`en` for `en-US` or `en_US`).
    pub fn language(&self) -> &str {
        self.0
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or(self.0.as_str())
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}
