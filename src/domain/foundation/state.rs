//! Dialogue state shared between the bot engine and the processors.
//!
//! The state is owned by the caller for the lifetime of a conversation and is
//! lent mutably to one processor call at a time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mutable key/value context of one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogueState {
    values: HashMap<String, String>,
}

impl DialogueState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the value stored under `key` unless it is missing or empty.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Returns true if `key` is present, even with an empty value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<HashMap<String, String>> for DialogueState {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DialogueState {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// State keys a processor reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateKeys {
    pub reads: Vec<String>,
    pub writes: Vec<String>,
}

impl StateKeys {
    /// Returns true if the processor touches `key` in any way.
    pub fn touches(&self, key: &str) -> bool {
        self.reads.iter().chain(self.writes.iter()).any(|k| k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_non_empty_skips_empty_values() {
        let mut state = DialogueState::new();
        state.set("field", "");
        assert_eq!(state.get("field"), Some(""));
        assert_eq!(state.get_non_empty("field"), None);
        assert!(state.contains("field"));
    }

    #[test]
    fn set_replaces_and_remove_returns_previous() {
        let mut state = DialogueState::new();
        state.set("k", "a");
        state.set("k", "b");
        assert_eq!(state.len(), 1);
        assert_eq!(state.remove("k"), Some("b".to_string()));
        assert!(state.is_empty());
    }

    #[test]
    fn collects_from_pairs() {
        let state: DialogueState = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(state.get("b"), Some("2"));
    }

    #[test]
    fn serializes_as_plain_map() {
        let state: DialogueState = [("city", "Paris")].into_iter().collect();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json, serde_json::json!({ "city": "Paris" }));
    }

    #[test]
    fn state_keys_touches_reads_and_writes() {
        let keys = StateKeys {
            reads: vec!["field".to_string()],
            writes: vec!["search".to_string()],
        };
        assert!(keys.touches("field"));
        assert!(keys.touches("search"));
        assert!(!keys.touches("other"));
    }
}
