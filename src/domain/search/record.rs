//! Directory entries and their mapping to flat display records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry returned by a directory search.
///
/// Attribute names are matched case-insensitively, as directories do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchEntry {
    pub dn: String,
    attributes: HashMap<String, Vec<String>>,
}

impl SearchEntry {
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: HashMap::new(),
        }
    }

    /// Adds a value to `name`, keeping earlier values first.
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes
            .entry(name.to_lowercase())
            .or_default()
            .push(value.into());
        self
    }

    pub fn values(&self, name: &str) -> &[String] {
        self.attributes
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First value of `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        !self.values(name).is_empty()
    }
}

/// Logical field key → directory attribute name, e.g. `name → cn`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMapping {
    attributes: IndexMap<String, String>,
}

impl AttributeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, key: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), attribute.into());
        self
    }

    /// Directory attribute for logical `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .map(String::as_str)
            .filter(|a| !a.is_empty())
    }

    /// First logical key bound to directory `attribute`.
    pub fn key_of(&self, attribute: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(_, a)| a.eq_ignore_ascii_case(attribute))
            .map(|(key, _)| key.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Projects `entry` onto the logical keys; missing attributes become `""`.
    pub fn to_record(&self, entry: &SearchEntry) -> DirectoryRecord {
        let fields = self
            .attributes
            .iter()
            .map(|(key, attribute)| {
                let value = entry.first(attribute).unwrap_or_default();
                (key.clone(), value.to_string())
            })
            .collect();
        DirectoryRecord { fields }
    }
}

impl From<IndexMap<String, String>> for AttributeMapping {
    fn from(attributes: IndexMap<String, String>) -> Self {
        Self { attributes }
    }
}

/// Flat view of one directory entry, keyed by logical field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DirectoryRecord {
    fields: IndexMap<String, String>,
}

impl DirectoryRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> AttributeMapping {
        AttributeMapping::new()
            .with_attribute("name", "cn")
            .with_attribute("mail", "mail")
            .with_attribute("phone", "telephoneNumber")
    }

    #[test]
    fn attribute_lookup_is_case_insensitive() {
        let entry = SearchEntry::new("uid=1,ou=people")
            .with_attribute("telephoneNumber", "0102030405");
        assert_eq!(entry.first("telephonenumber"), Some("0102030405"));
        assert!(entry.has_attribute("TELEPHONENUMBER"));
    }

    #[test]
    fn record_uses_first_value_and_empty_for_missing() {
        let entry = SearchEntry::new("uid=1,ou=people")
            .with_attribute("cn", "Jean Dupont")
            .with_attribute("mail", "jean@example.org")
            .with_attribute("mail", "jd@example.org");

        let record = mapping().to_record(&entry);
        assert_eq!(record.get("name"), Some("Jean Dupont"));
        assert_eq!(record.get("mail"), Some("jean@example.org"));
        assert_eq!(record.get("phone"), Some(""));
    }

    #[test]
    fn record_follows_mapping_order() {
        let record = mapping().to_record(&SearchEntry::new("uid=1"));
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "mail", "phone"]);
    }

    #[test]
    fn empty_attribute_name_is_not_mapped() {
        let mapping = AttributeMapping::new().with_attribute("x", "");
        assert_eq!(mapping.attribute("x"), None);
    }
}
