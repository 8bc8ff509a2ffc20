//! Search filter and result mapping configuration

use indexmap::IndexMap;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::search::{
    AttributeMapping, FilterStrategy, FilterTemplates, SearchPolicy, DEFAULT_CRITERION,
};

/// Search configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Criterion used when the dialogue did not name one
    #[serde(default = "default_criterion")]
    pub default_criterion: String,

    /// How answers are accumulated into the filter
    #[serde(default)]
    pub strategy: FilterStrategy,

    /// Logical field key -> directory attribute name
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Criterion name -> filter fragment template with a `{0}` slot
    #[serde(default)]
    pub filter_templates: IndexMap<String, String>,
}

impl SearchConfig {
    /// Build the search policy used by the search processor
    pub fn policy(&self) -> SearchPolicy {
        SearchPolicy::new(
            FilterTemplates::from(self.filter_templates.clone()),
            AttributeMapping::from(self.attributes.clone()),
        )
        .with_strategy(self.strategy)
        .with_default_criterion(self.default_criterion.clone())
    }

    /// Validate search configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_criterion.is_empty() {
            return Err(ValidationError::MissingRequired("SEARCH_DEFAULT_CRITERION"));
        }
        let templates = FilterTemplates::from(self.filter_templates.clone());
        if let Some(criterion) = templates.missing_slot().next() {
            return Err(ValidationError::TemplateWithoutSlot(criterion.to_string()));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_criterion: default_criterion(),
            strategy: FilterStrategy::default(),
            attributes: IndexMap::new(),
            filter_templates: IndexMap::new(),
        }
    }
}

fn default_criterion() -> String {
    DEFAULT_CRITERION.to_string()
}
