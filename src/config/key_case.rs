//! Original spelling of user-defined map keys
//!
//! The `config` crate lowercases every key while merging sources. Term map
//! values, criterion names, attribute keys, locale tags and message keys are
//! data rather than field names, so their spelling is read back from the
//! configuration files and reapplied after deserialization. Values still
//! come from the merged configuration, environment overrides included.

use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::error::ConfigError;
use super::AppConfig;

/// Extensions tried, in order, for a file named without one
const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Finds the file `config::File` would read for `name`
pub(super) fn locate(name: &Path) -> Option<PathBuf> {
    if name.is_file() {
        return Some(name.to_path_buf());
    }
    EXTENSIONS
        .iter()
        .map(|ext| name.with_extension(ext))
        .find(|candidate| candidate.is_file())
}

type Keys = IndexMap<String, IgnoredAny>;

#[derive(Debug, Default, Deserialize)]
struct RawFile {
    #[serde(default)]
    search: RawSearch,
    #[serde(default)]
    classification: RawClassification,
    #[serde(default)]
    localization: RawLocalization,
}

#[derive(Debug, Default, Deserialize)]
struct RawSearch {
    #[serde(default)]
    attributes: Keys,
    #[serde(default)]
    filter_templates: Keys,
}

#[derive(Debug, Default, Deserialize)]
struct RawClassification {
    #[serde(default)]
    term_map: Keys,
}

#[derive(Debug, Default, Deserialize)]
struct RawLocalization {
    #[serde(default)]
    messages: IndexMap<String, Keys>,
}

/// Lowercased key -> spelling found in the files, per map
#[derive(Debug, Default)]
pub(super) struct KeySpelling {
    attributes: HashMap<String, String>,
    filter_templates: HashMap<String, String>,
    term_map: HashMap<String, String>,
    locales: HashMap<String, String>,
    messages: HashMap<String, String>,
}

impl KeySpelling {
    /// Collects key spellings from `files`; later files win
    pub(super) fn from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut spelling = Self::default();
        for path in files {
            spelling.absorb(read(path)?);
        }
        Ok(spelling)
    }

    /// Renames the map keys of `config` back to their original spelling
    pub(super) fn apply(&self, config: &mut AppConfig) {
        config.search.attributes = respell(
            std::mem::take(&mut config.search.attributes),
            &self.attributes,
        );
        config.search.filter_templates = respell(
            std::mem::take(&mut config.search.filter_templates),
            &self.filter_templates,
        );

        if let Some(classification) = config.classification.as_mut() {
            if let Some(term_map) = classification.term_map.take() {
                classification.term_map = Some(respell(term_map, &self.term_map));
            }
        }

        let messages = std::mem::take(&mut config.localization.messages);
        config.localization.messages = respell::<Vec<_>, _>(messages, &self.locales)
            .into_iter()
            .map(|(locale, bundle)| (locale, respell(bundle, &self.messages)))
            .collect();
    }

    fn absorb(&mut self, raw: RawFile) {
        record(&mut self.attributes, raw.search.attributes.keys());
        record(&mut self.filter_templates, raw.search.filter_templates.keys());
        record(&mut self.term_map, raw.classification.term_map.keys());
        record(&mut self.locales, raw.localization.messages.keys());
        for bundle in raw.localization.messages.values() {
            record(&mut self.messages, bundle.keys());
        }
    }
}

fn read(path: &Path) -> Result<RawFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::KeySpelling {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if content.trim().is_empty() {
        return Ok(RawFile::default());
    }

    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let parsed = match extension {
        "toml" => toml::from_str(&content).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
        _ => return Ok(RawFile::default()),
    };
    parsed.map_err(|reason| ConfigError::KeySpelling {
        path: path.to_path_buf(),
        reason,
    })
}

fn record<'a>(spelling: &mut HashMap<String, String>, keys: impl Iterator<Item = &'a String>) {
    for key in keys {
        let lowered = key.to_lowercase();
        if let Some(previous) = spelling.get(&lowered) {
            if previous != key {
                warn!(
                    key = %key,
                    previous = %previous,
                    "Configuration keys differ only by case, keeping the later one"
                );
            }
        }
        spelling.insert(lowered, key.clone());
    }
}

fn respell<M, V>(map: impl IntoIterator<Item = (String, V)>, spelling: &HashMap<String, String>) -> M
where
    M: FromIterator<(String, V)>,
{
    map.into_iter()
        .map(|(key, value)| match spelling.get(&key) {
            Some(original) => (original.clone(), value),
            None => (key, value),
        })
        .collect()
}
