//! Processor wiring: which dialogue state keys each processor uses

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::classification::{TermMap, TermMapError};
use crate::domain::foundation::InvalidResponseMessage;

/// Classification processor configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassificationConfig {
    /// Inline canonical value -> trigger terms
    pub term_map: Option<IndexMap<String, Vec<String>>>,

    /// YAML file holding the term map
    pub term_map_file: Option<PathBuf>,

    /// State keys cleared after every classification
    #[serde(default)]
    pub loop_rules: Vec<String>,

    /// Value that restarts the search
    pub reinit_value: Option<String>,

    /// State key cleared on reinit (defaults to the search key)
    pub reinit_state_key: Option<String>,

    /// Message shown when no term matches
    #[serde(default)]
    pub invalid_response: InvalidResponseMessage,
}

impl ClassificationConfig {
    /// Load the term map from its inline or file source
    pub fn load_term_map(&self) -> Result<TermMap, TermMapError> {
        match (&self.term_map, &self.term_map_file) {
            (Some(inline), _) => Ok(TermMap::from(inline.clone())),
            (None, Some(path)) => TermMap::from_yaml_file(path),
            (None, None) => Ok(TermMap::new()),
        }
    }

    /// Validate classification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (&self.term_map, &self.term_map_file) {
            (Some(_), Some(_)) => return Err(ValidationError::AmbiguousTermMap),
            (None, None) => return Err(ValidationError::NoTermMap),
            _ => {}
        }
        if self.loop_rules.iter().any(String::is_empty) {
            return Err(ValidationError::EmptyStateKey("loop_rules"));
        }
        if matches!(&self.reinit_state_key, Some(key) if key.is_empty()) {
            return Err(ValidationError::EmptyStateKey("reinit_state_key"));
        }
        Ok(())
    }
}

/// Directory search processor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchProcessorConfig {
    /// State key naming the current criterion
    #[serde(default = "default_search_field_key")]
    pub search_field_key: String,

    /// State key holding the accumulated search
    #[serde(default = "default_search_key")]
    pub search_key: String,

    /// State key receiving the rendered directory listing
    #[serde(default = "default_show_directory_key")]
    pub show_directory_key: String,

    /// Message shown for an empty answer
    #[serde(default)]
    pub invalid_response: InvalidResponseMessage,
}

impl SearchProcessorConfig {
    /// Validate search processor configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.search_field_key.is_empty() {
            return Err(ValidationError::EmptyStateKey("search_field_key"));
        }
        if self.search_key.is_empty() {
            return Err(ValidationError::EmptyStateKey("search_key"));
        }
        if self.show_directory_key.is_empty() {
            return Err(ValidationError::EmptyStateKey("show_directory_key"));
        }
        if self.search_key == self.show_directory_key {
            return Err(ValidationError::DuplicateStateKey(
                "search_key",
                "show_directory_key",
            ));
        }
        if self.search_key == self.search_field_key {
            return Err(ValidationError::DuplicateStateKey(
                "search_key",
                "search_field_key",
            ));
        }
        Ok(())
    }
}

impl Default for SearchProcessorConfig {
    fn default() -> Self {
        Self {
            search_field_key: default_search_field_key(),
            search_key: default_search_key(),
            show_directory_key: default_show_directory_key(),
            invalid_response: InvalidResponseMessage::default(),
        }
    }
}

fn default_search_field_key() -> String {
    "search_field".to_string()
}

fn default_search_key() -> String {
    "ldap_search".to_string()
}

fn default_show_directory_key() -> String {
    "show_directory".to_string()
}
