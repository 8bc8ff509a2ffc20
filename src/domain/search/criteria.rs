//! Search tokens accumulated across dialogue turns.
//!
//! Answers are stored as `name:value` tokens joined with commas in a single
//! dialogue state entry. The value is kept raw; escaping happens when the
//! filter is built.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

const TOKEN_SEPARATOR: char = ',';
const NAME_SEPARATOR: char = ':';

/// One `name:value` answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchToken {
    pub name: String,
    pub value: String,
}

impl SearchToken {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parses a token, splitting on the first colon.
    pub fn parse(token: &str) -> Option<Self> {
        token
            .split_once(NAME_SEPARATOR)
            .map(|(name, value)| Self::new(name, value))
    }
}

impl fmt::Display for SearchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, NAME_SEPARATOR, self.value)
    }
}

/// Appends `token` to an accumulator string.
pub fn append_token(accumulator: &str, token: &SearchToken) -> String {
    if accumulator.is_empty() {
        token.to_string()
    } else {
        format!("{}{}{}", accumulator, TOKEN_SEPARATOR, token)
    }
}

/// Criterion name → value, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchCriteria {
    values: IndexMap<String, String>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an accumulator string.
    ///
    /// Tokens without a colon are ignored. This includes the tail of an
    /// answer that itself contained a comma. A criterion given twice keeps
    /// its first position and its last value.
    pub fn parse(accumulator: &str) -> Self {
        let mut criteria = Self::new();
        for raw in accumulator.split(TOKEN_SEPARATOR) {
            match SearchToken::parse(raw) {
                Some(token) => criteria.insert(token.name, token.value),
                None if raw.is_empty() => {}
                None => tracing::debug!(token = raw, "Dropping search token without a criterion"),
            }
        }
        criteria
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
