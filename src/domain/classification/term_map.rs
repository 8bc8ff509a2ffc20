//! Ordered mapping from canonical values to their trigger terms.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a term map.
#[derive(Debug, Error)]
pub enum TermMapError {
    #[error("Cannot read term map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse term map file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Canonical value → trigger terms, in precedence order.
///
/// Iteration order is significant: the first value owning a matching term
/// wins, so the map keeps insertion (or document) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermMap {
    entries: IndexMap<String, Vec<String>>,
}

impl TermMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a canonical value with its terms, keeping builder order.
    pub fn with_value<I, S>(mut self, value: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(value.into(), terms.into_iter().map(Into::into).collect());
        self
    }

    /// Loads a YAML mapping of `value: [term, ...]` from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, TermMapError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TermMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| TermMapError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a YAML mapping of `value: [term, ...]`.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        let entries: IndexMap<String, Vec<String>> = serde_yaml::from_str(content)?;
        Ok(Self { entries })
    }

    /// Iterates values and their terms in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(v, t)| (v.as_str(), t.as_slice()))
    }

    pub fn terms_of(&self, value: &str) -> Option<&[String]> {
        self.entries.get(value).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<IndexMap<String, Vec<String>>> for TermMap {
    fn from(entries: IndexMap<String, Vec<String>>) -> Self {
        Self { entries }
    }
}
