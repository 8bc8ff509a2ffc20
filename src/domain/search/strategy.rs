//! How an answer is folded into the stored search and turned into a filter.

use serde::{Deserialize, Serialize};

use super::{
    append_token, build_filter, escape_filter_value, unescape_filter_value, wrap_conjunction,
    AttributeMapping, FilterTemplates, SearchCriteria, SearchToken,
};

/// Criterion used when the dialogue did not name one.
pub const DEFAULT_CRITERION: &str = "default";

/// Accumulation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStrategy {
    /// Store `name:value` tokens and rebuild the filter from all of them
    /// through the per-criterion templates.
    #[default]
    TokenRebuild,
    /// Store raw `(attr=value*)` clauses and wrap them on each query.
    RawAppend,
}

/// Outcome of folding one answer into the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUpdate {
    /// New value of the search accumulator state entry.
    pub stored: String,
    /// Filter to send to the directory; empty when there is nothing to match.
    pub filter: String,
    /// Criteria to show alongside the results.
    pub criteria: SearchCriteria,
}

/// Everything needed to turn answers into directory filters.
#[derive(Debug, Clone, Default)]
pub struct SearchPolicy {
    pub strategy: FilterStrategy,
    pub default_criterion: String,
    pub templates: FilterTemplates,
    pub attributes: AttributeMapping,
}

impl SearchPolicy {
    pub fn new(templates: FilterTemplates, attributes: AttributeMapping) -> Self {
        Self {
            strategy: FilterStrategy::default(),
            default_criterion: DEFAULT_CRITERION.to_string(),
            templates,
            attributes,
        }
    }

    pub fn with_strategy(mut self, strategy: FilterStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_default_criterion(mut self, criterion: impl Into<String>) -> Self {
        self.default_criterion = criterion.into();
        self
    }

    /// Criterion named by the dialogue, or the default one.
    pub fn criterion<'a>(&'a self, search_field: Option<&'a str>) -> &'a str {
        search_field
            .filter(|f| !f.is_empty())
            .unwrap_or(self.default_criterion.as_str())
    }

    /// Folds `response` into the `stored` search.
    ///
    /// `search_field` is the current criterion from the dialogue state, if
    /// any.
    pub fn accumulate(
        &self,
        stored: Option<&str>,
        search_field: Option<&str>,
        response: &str,
    ) -> SearchUpdate {
        let stored = stored.unwrap_or_default();
        match self.strategy {
            FilterStrategy::TokenRebuild => {
                let token = SearchToken::new(self.criterion(search_field), response);
                let stored = append_token(stored, &token);
                let criteria = SearchCriteria::parse(&stored);
                let filter = build_filter(&criteria, &self.templates);
                SearchUpdate {
                    stored,
                    filter,
                    criteria,
                }
            }
            FilterStrategy::RawAppend => {
                let mut stored = stored.to_string();
                if let Some(clause) = search_field
                    .filter(|f| !f.is_empty())
                    .and_then(|field| self.prefix_clause(field, response))
                {
                    stored.push_str(&clause);
                }
                let criteria = self.clause_criteria(&stored);
                let filter = wrap_conjunction(&stored);
                SearchUpdate {
                    stored,
                    filter,
                    criteria,
                }
            }
        }
    }

    /// Rebuilds the filter from a stored search without adding anything.
    pub fn rebuild(&self, stored: &str) -> String {
        match self.strategy {
            FilterStrategy::TokenRebuild => {
                build_filter(&SearchCriteria::parse(stored), &self.templates)
            }
            FilterStrategy::RawAppend => wrap_conjunction(stored),
        }
    }

    /// Criteria behind stored `(attr=value*)` clauses.
    ///
    /// Each attribute maps back to the first logical key bound to it, or
    /// stays as is when none is. Escaped values never contain raw
    /// parentheses, so clauses split cleanly on `)`.
    fn clause_criteria(&self, stored: &str) -> SearchCriteria {
        let mut criteria = SearchCriteria::new();
        for clause in stored.split_terminator(')') {
            let (attribute, value) = match clause.trim_start_matches('(').split_once('=') {
                Some(parts) => parts,
                None => continue,
            };
            let value = value.strip_suffix('*').unwrap_or(value);
            let name = self.attributes.key_of(attribute).unwrap_or(attribute);
            criteria.insert(name, unescape_filter_value(value));
        }
        criteria
    }

    fn prefix_clause(&self, criterion: &str, response: &str) -> Option<String> {
        match self.attributes.attribute(criterion) {
            Some(attribute) => Some(format!(
                "({}={}*)",
                attribute,
                escape_filter_value(response)
            )),
            None => {
                tracing::warn!(criterion, "No directory attribute mapped for criterion");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(strategy: FilterStrategy) -> SearchPolicy {
        SearchPolicy::new(
            FilterTemplates::new()
                .with_template("name", "(cn=*{0}*)")
                .with_template("city", "(l={0})")
                .with_template("default", "(|(cn=*{0}*)(l={0}))"),
            AttributeMapping::new()
                .with_attribute("name", "cn")
                .with_attribute("city", "l"),
        )
        .with_strategy(strategy)
    }

    #[test]
    fn default_criterion_when_field_missing_or_empty() {
        let policy = policy(FilterStrategy::TokenRebuild);
        assert_eq!(policy.criterion(None), "default");
        assert_eq!(policy.criterion(Some("")), "default");
        assert_eq!(policy.criterion(Some("city")), "city");
    }

    #[test]
    fn token_rebuild_first_answer() {
        let update = policy(FilterStrategy::TokenRebuild).accumulate(None, Some("city"), "Paris");
        assert_eq!(update.stored, "city:Paris");
        assert_eq!(update.filter, "(&(l=Paris))");
        assert_eq!(update.criteria.get("city"), Some("Paris"));
    }

    #[test]
    fn token_rebuild_appends_to_existing() {
        let update = policy(FilterStrategy::TokenRebuild).accumulate(
            Some("name:v1"),
            Some("name2"),
            "v2",
        );
        assert_eq!(update.stored, "name:v1,name2:v2");
        assert_eq!(update.filter, "(&(cn=*v1*))");
    }

    #[test]
    fn token_rebuild_uses_default_criterion() {
        let update = policy(FilterStrategy::TokenRebuild).accumulate(Some(""), None, "Roy");
        assert_eq!(update.stored, "default:Roy");
        assert_eq!(update.filter, "(&(|(cn=*Roy*)(l=Roy)))");
    }

    #[test]
    fn token_rebuild_filter_matches_rebuild() {
        let policy = policy(FilterStrategy::TokenRebuild);
        let update = policy.accumulate(Some("city:Lyon"), Some("name"), "Jean Roy");
        assert_eq!(policy.rebuild(&update.stored), update.filter);
    }

    #[test]
    fn raw_append_builds_prefix_clause() {
        let update = policy(FilterStrategy::RawAppend).accumulate(None, Some("name"), "Dup");
        assert_eq!(update.stored, "(cn=Dup*)");
        assert_eq!(update.filter, "(&(cn=Dup*))");
    }

    #[test]
    fn raw_append_concatenates_clauses() {
        let update =
            policy(FilterStrategy::RawAppend).accumulate(Some("(cn=Dup*)"), Some("city"), "Ly");
        assert_eq!(update.stored, "(cn=Dup*)(l=Ly*)");
        assert_eq!(update.filter, "(&(cn=Dup*)(l=Ly*))");
        assert_eq!(
            update.criteria.iter().collect::<Vec<_>>(),
            vec![("name", "Dup"), ("city", "Ly")]
        );
    }

    #[test]
    fn raw_append_lists_every_stored_criterion() {
        let policy = policy(FilterStrategy::RawAppend);
        let first = policy.accumulate(None, Some("name"), "a*(b)");
        let second = policy.accumulate(Some(&first.stored), Some("city"), "Saint-Étienne");
        let third = policy.accumulate(Some(&second.stored), Some("mail"), "x");

        assert_eq!(
            third.criteria.iter().collect::<Vec<_>>(),
            vec![("name", "a*(b)"), ("city", "Saint-Étienne")]
        );
    }

    #[test]
    fn raw_append_unknown_attribute_keeps_its_name() {
        let update =
            policy(FilterStrategy::RawAppend).accumulate(Some("(sn=Roy*)"), Some("city"), "Lyon");
        assert_eq!(update.criteria.get("sn"), Some("Roy"));
        assert_eq!(update.criteria.get("city"), Some("Lyon"));
    }

    #[test]
    fn raw_append_escapes_answer() {
        let update = policy(FilterStrategy::RawAppend).accumulate(None, Some("name"), "a*(b)");
        assert_eq!(update.stored, "(cn=a\\2a\\28b\\29*)");
    }

    #[test]
    fn raw_append_without_field_keeps_filter() {
        let update =
            policy(FilterStrategy::RawAppend).accumulate(Some("(cn=Dup*)"), None, "ignored");
        assert_eq!(update.stored, "(cn=Dup*)");
        assert_eq!(update.filter, "(&(cn=Dup*))");
        assert_eq!(update.criteria.get("name"), Some("Dup"));
        assert_eq!(update.criteria.len(), 1);
    }

    #[test]
    fn raw_append_unmapped_criterion_adds_nothing() {
        let update = policy(FilterStrategy::RawAppend).accumulate(None, Some("shoe"), "42");
        assert_eq!(update.stored, "");
        assert_eq!(update.filter, "");
    }

    #[test]
    fn strategy_deserializes_snake_case() {
        let s: FilterStrategy = serde_json::from_str("\"raw_append\"").unwrap();
        assert_eq!(s, FilterStrategy::RawAppend);
    }
}
