//! Directory filter assembly from accumulated criteria.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{escape_filter_value, SearchCriteria};

/// Placeholder substituted with each answer word.
pub const VALUE_SLOT: &str = "{0}";

/// Criterion name → filter fragment template, e.g. `name → (cn=*{0}*)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterTemplates {
    templates: IndexMap<String, String>,
}

impl FilterTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, criterion: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(criterion.into(), template.into());
        self
    }

    /// Template for `criterion`, ignoring empty templates.
    pub fn get(&self, criterion: &str) -> Option<&str> {
        self.templates
            .get(criterion)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }

    /// Criteria whose non-empty template lacks the value slot.
    pub fn missing_slot(&self) -> impl Iterator<Item = &str> {
        self.templates
            .iter()
            .filter(|(_, t)| !t.is_empty() && !t.contains(VALUE_SLOT))
            .map(|(c, _)| c.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl From<IndexMap<String, String>> for FilterTemplates {
    fn from(templates: IndexMap<String, String>) -> Self {
        Self { templates }
    }
}

/// Substitutes an escaped `value` into `template`.
pub fn fill_template(template: &str, value: &str) -> String {
    template.replace(VALUE_SLOT, &escape_filter_value(value))
}

/// Builds the conjunctive filter for `criteria`.
///
/// Each criterion value is split on spaces; every non-empty word yields one
/// fragment from the criterion's template. Criteria without a template are
/// skipped. Returns an empty string when no fragment was produced.
pub fn build_filter(criteria: &SearchCriteria, templates: &FilterTemplates) -> String {
    let fragments: String = criteria
        .iter()
        .filter_map(|(name, value)| templates.get(name).map(|template| (template, value)))
        .flat_map(|(template, value)| {
            value
                .split(' ')
                .filter(|word| !word.is_empty())
                .map(move |word| fill_template(template, word))
        })
        .collect();

    wrap_conjunction(&fragments)
}

/// Wraps fragments as `(&...)`, or returns an empty string.
pub fn wrap_conjunction(fragments: &str) -> String {
    if fragments.is_empty() {
        String::new()
    } else {
        format!("(&{})", fragments)
    }
}
