//! Directory (LDAP) connection configuration

use secrecy::{Secret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::ports::{ConnectionParams, SearchScope};

/// Directory connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    /// Client provider identifier
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Server URL (ldap:// or ldaps://)
    pub url: String,

    /// DN used to bind
    #[serde(default)]
    pub bind_dn: String,

    /// Bind password
    #[serde(default = "empty_secret")]
    pub bind_password: SecretString,

    /// Base DN for person searches
    #[serde(default)]
    pub search_base: String,

    /// Search the whole subtree instead of one level
    #[serde(default = "default_subtree")]
    pub subtree: bool,
}

impl DirectoryConfig {
    /// Creates a configuration for `url` with defaults elsewhere.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            provider: default_provider(),
            url: url.into(),
            bind_dn: String::new(),
            bind_password: empty_secret(),
            search_base: String::new(),
            subtree: default_subtree(),
        }
    }

    /// Search scope derived from the subtree flag
    pub fn scope(&self) -> SearchScope {
        SearchScope::from_subtree_flag(self.subtree)
    }

    /// Parameters handed to the directory client on each search
    pub fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            provider: self.provider.clone(),
            url: self.url.clone(),
            bind_dn: self.bind_dn.clone(),
            bind_password: self.bind_password.clone(),
            search_base: self.search_base.clone(),
            scope: self.scope(),
        }
    }

    /// Validate directory configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DIRECTORY_URL"));
        }
        if !self.url.starts_with("ldap://") && !self.url.starts_with("ldaps://") {
            return Err(ValidationError::InvalidDirectoryUrl);
        }
        Ok(())
    }
}

fn default_provider() -> String {
    "ldap".to_string()
}

fn default_subtree() -> bool {
    true
}

fn empty_secret() -> SecretString {
    Secret::new(String::new())
}
