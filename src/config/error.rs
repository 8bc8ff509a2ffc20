//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Could not read map keys from {path}: {reason}")]
    KeySpelling { path: PathBuf, reason: String },

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid directory URL format (expected ldap:// or ldaps://)")]
    InvalidDirectoryUrl,

    #[error("Filter template for criterion '{0}' has no {{0}} placeholder")]
    TemplateWithoutSlot(String),

    #[error("Term map given both inline and as a file")]
    AmbiguousTermMap,

    #[error("No term map configured for classification")]
    NoTermMap,

    #[error("State key '{0}' must not be empty")]
    EmptyStateKey(&'static str),

    #[error("State keys '{0}' and '{1}' must be distinct")]
    DuplicateStateKey(&'static str, &'static str),

    #[error("Default locale must not be empty")]
    EmptyDefaultLocale,

    #[error("Reinit value '{0}' is not a value of the term map")]
    UnknownReinitValue(String),
}
