//! Keyword classifier mapping free-text answers to canonical values.

use thiserror::Error;

use super::TermMap;
use crate::domain::foundation::DialogueState;

/// No configured term occurs in the response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("No trigger term matches the response")]
pub struct NoMatchingTerm;

/// Value that restarts the search dialogue, and the state key it clears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReinitRule {
    pub value: String,
    pub state_key: String,
}

impl ReinitRule {
    pub fn new(value: impl Into<String>, state_key: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            state_key: state_key.into(),
        }
    }
}

/// First-match-wins classifier over a [`TermMap`].
///
/// A successful classification always clears the loop rule keys from the
/// dialogue state, and clears the reinit state key when the reinit value is
/// returned. A failed classification leaves the state untouched.
#[derive(Debug, Clone)]
pub struct Classifier {
    terms: TermMap,
    loop_rules: Vec<String>,
    reinit: Option<ReinitRule>,
}

impl Classifier {
    pub fn new(terms: TermMap) -> Self {
        Self {
            terms,
            loop_rules: Vec::new(),
            reinit: None,
        }
    }

    /// Sets the state keys cleared after every classification.
    pub fn with_loop_rules(mut self, keys: Vec<String>) -> Self {
        self.loop_rules = keys;
        self
    }

    pub fn with_reinit(mut self, rule: ReinitRule) -> Self {
        self.reinit = Some(rule);
        self
    }

    pub fn terms(&self) -> &TermMap {
        &self.terms
    }

    pub fn loop_rules(&self) -> &[String] {
        &self.loop_rules
    }

    pub fn reinit(&self) -> Option<&ReinitRule> {
        self.reinit.as_ref()
    }

    /// Finds the canonical value for `response` without touching any state.
    pub fn find_value(&self, response: &str) -> Option<&str> {
        let lowered = response.to_lowercase();
        self.terms
            .iter()
            .find(|(_, terms)| terms.iter().any(|term| lowered.contains(term.as_str())))
            .map(|(value, _)| value)
    }

    /// Classifies `response` and applies the loop/reinit side effects.
    pub fn classify(
        &self,
        response: &str,
        state: &mut DialogueState,
    ) -> Result<String, NoMatchingTerm> {
        let value = self.find_value(response).ok_or(NoMatchingTerm)?.to_string();

        for key in &self.loop_rules {
            state.remove(key);
        }

        if let Some(rule) = &self.reinit {
            if rule.value == value {
                state.remove(&rule.state_key);
            }
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn yes_no() -> TermMap {
        TermMap::new()
            .with_value("yes", ["yes", "oui"])
            .with_value("no", ["no", "non"])
    }

    fn loop_state() -> DialogueState {
        [
            ("rule.city", "asked"),
            ("rule.name", "asked"),
            ("search", "city:Paris"),
            ("unrelated", "kept"),
        ]
        .into_iter()
        .collect()
    }

    fn classifier() -> Classifier {
        Classifier::new(
            TermMap::new()
                .with_value("again", ["again", "encore"])
                .with_value("done", ["done", "fini"]),
        )
        .with_loop_rules(vec!["rule.city".to_string(), "rule.name".to_string()])
        .with_reinit(ReinitRule::new("again", "search"))
    }

    #[test]
    fn matches_case_insensitively() {
        let classifier = Classifier::new(yes_no());
        let mut state = DialogueState::new();
        assert_eq!(
            classifier.classify("Oui bien sur", &mut state).unwrap(),
            "yes"
        );
    }

    #[test]
    fn first_value_in_map_order_wins() {
        let classifier = Classifier::new(yes_no());
        assert_eq!(classifier.find_value("yes and no"), Some("yes"));
        assert_eq!(classifier.find_value("non merci"), Some("no"));
    }

    #[test]
    fn substring_match_inside_words() {
        let classifier = Classifier::new(yes_no());
        // "nothing" contains "no".
        assert_eq!(classifier.find_value("nothing"), Some("no"));
    }

    #[test]
    fn terms_are_not_lowercased() {
        let classifier = Classifier::new(TermMap::new().with_value("yes", ["Yes"]));
        assert_eq!(classifier.find_value("Yes"), None);
    }

    #[test]
    fn no_match_leaves_state_untouched() {
        let classifier = classifier();
        let mut state = loop_state();
        let before = state.clone();

        assert_eq!(
            classifier.classify("maybe", &mut state),
            Err(NoMatchingTerm)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn success_clears_loop_rules_only() {
        let classifier = classifier();
        let mut state = loop_state();

        assert_eq!(classifier.classify("I'm done", &mut state).unwrap(), "done");
        assert!(!state.contains("rule.city"));
        assert!(!state.contains("rule.name"));
        assert_eq!(state.get("search"), Some("city:Paris"));
        assert_eq!(state.get("unrelated"), Some("kept"));
    }

    #[test]
    fn reinit_value_also_clears_search_key() {
        let classifier = classifier();
        let mut state = loop_state();

        assert_eq!(
            classifier.classify("Encore une fois", &mut state).unwrap(),
            "again"
        );
        assert!(!state.contains("search"));
        assert!(!state.contains("rule.city"));
        assert_eq!(state.get("unrelated"), Some("kept"));
    }

    #[test]
    fn empty_term_map_never_matches() {
        let classifier = Classifier::new(TermMap::new());
        assert_eq!(classifier.find_value("anything"), None);
    }

    proptest! {
        #[test]
        fn any_response_containing_a_term_classifies(
            prefix in "[a-z ]{0,10}",
            suffix in "[a-z ]{0,10}",
            upper in any::<bool>(),
        ) {
            let classifier = Classifier::new(TermMap::new().with_value("target", ["xyzzy"]));
            let term = if upper { "XYZZY" } else { "xyzzy" };
            let response = format!("{}{}{}", prefix, term, suffix);
            let mut state = DialogueState::new();
            prop_assert_eq!(classifier.classify(&response, &mut state).unwrap(), "target");
        }

        #[test]
        fn loop_rules_always_absent_after_success(response in "(done|again|fini|encore) [a-z]{0,8}") {
            let classifier = classifier();
            let mut state = loop_state();
            prop_assert!(classifier.classify(&response, &mut state).is_ok());
            for key in classifier.loop_rules() {
                prop_assert!(!state.contains(key));
            }
        }
    }
}
