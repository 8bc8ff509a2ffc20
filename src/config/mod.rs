//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Sources are layered in this order, later ones
//! winning:
//!
//! 1. `directory-bot.{toml,yaml,json}` in the working directory, if present
//! 2. the file named by `DIRECTORY_BOT_CONFIG`, if set
//! 3. environment variables with the `DIRECTORY_BOT` prefix, nested values
//!    separated by `__`
//!
//! # Example
//!
//! ```no_run
//! use directory_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Directory at {}", config.directory.url);
//! ```

mod directory;
mod error;
mod key_case;
mod localization;
mod logging;
mod processors;
mod search;

pub use directory::DirectoryConfig;
pub use error::{ConfigError, ValidationError};
pub use localization::LocalizationConfig;
pub use logging::LoggingConfig;
pub use processors::{ClassificationConfig, SearchProcessorConfig};
pub use search::SearchConfig;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use key_case::KeySpelling;

const ENV_PREFIX: &str = "DIRECTORY_BOT";
const CONFIG_PATH_VAR: &str = "DIRECTORY_BOT_CONFIG";
const DEFAULT_CONFIG_NAME: &str = "directory-bot";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] or [`AppConfig::load_from()`].
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory connection (URL, bind credentials, base, scope)
    pub directory: DirectoryConfig,

    /// Filter templates, attribute mapping and accumulation strategy
    #[serde(default)]
    pub search: SearchConfig,

    /// Classification processor; absent when only searching
    pub classification: Option<ClassificationConfig>,

    /// Search processor state keys and messages
    #[serde(default)]
    pub search_processor: SearchProcessorConfig,

    /// Localized message bundles
    #[serde(default)]
    pub localization: LocalizationConfig,

    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the default file locations and environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required values are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false));
        let mut files: Vec<PathBuf> = key_case::locate(Path::new(DEFAULT_CONFIG_NAME))
            .into_iter()
            .collect();

        if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            builder = builder.add_source(config::File::with_name(&path));
            files.extend(key_case::locate(Path::new(&path)));
        }

        let mut config: Self = builder
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        KeySpelling::from_files(&files)?.apply(&mut config);

        Ok(config)
    }

    /// Load configuration from `path`, overridden by the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path = path.as_ref();

        let mut config: Self = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        let files: Vec<PathBuf> = key_case::locate(path).into_iter().collect();
        KeySpelling::from_files(&files)?.apply(&mut config);

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.directory.validate()?;
        self.search.validate()?;
        if let Some(classification) = &self.classification {
            classification.validate()?;
        }
        self.search_processor.validate()?;
        self.localization.validate()?;
        Ok(())
    }

    /// Load then validate
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::FilterStrategy;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const SAMPLE: &str = r#"
[directory]
url = "ldap://ldap.example.org:389"
bind_dn = "cn=bot,dc=example,dc=org"
bind_password = "secret"
search_base = "ou=people,dc=example,dc=org"
subtree = false

[search]
strategy = "token_rebuild"

[search.attributes]
name = "cn"
mail = "mail"

[search.filter_templates]
name = "(cn=*{0}*)"
city = "(l={0})"

[classification]
loop_rules = ["rule_city", "rule_name"]
reinit_value = "again"

[classification.term_map]
again = ["again", "encore"]
done = ["done", "fini"]

[classification.invalid_response]
i18n_key = "invalid_answer"

[localization.messages.fr]
invalid_answer = "Pardon ?"
"#;

    fn sample_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn clear_env() {
        env::remove_var("DIRECTORY_BOT__DIRECTORY__URL");
        env::remove_var("DIRECTORY_BOT__SEARCH__STRATEGY");
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = sample_file(SAMPLE);

        let result = AppConfig::load_from(file.path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();

        assert_eq!(config.directory.url, "ldap://ldap.example.org:389");
        assert!(!config.directory.subtree);
        assert_eq!(config.search.attributes.get("name").unwrap(), "cn");
        assert_eq!(config.search.filter_templates.len(), 2);

        let classification = config.classification.as_ref().unwrap();
        assert_eq!(classification.loop_rules, vec!["rule_city", "rule_name"]);
        assert_eq!(classification.reinit_value.as_deref(), Some("again"));

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = sample_file("[directory]\nurl = \"ldap://localhost\"\n");

        let config = AppConfig::load_from(file.path()).unwrap();
        assert!(config.classification.is_none());
        assert_eq!(config.search.default_criterion, "default");
        assert_eq!(config.search_processor.search_key, "ldap_search");
        assert_eq!(config.localization.default_locale, "en");
        assert_eq!(config.logging.level, "info");
        assert!(config.directory.subtree);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = sample_file(SAMPLE);

        env::set_var("DIRECTORY_BOT__DIRECTORY__URL", "ldaps://override.example.org");
        env::set_var("DIRECTORY_BOT__SEARCH__STRATEGY", "raw_append");
        let result = AppConfig::load_from(file.path());
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.directory.url, "ldaps://override.example.org");
        assert_eq!(config.search.strategy, FilterStrategy::RawAppend);
    }

    #[test]
    fn test_missing_directory_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = sample_file("[search]\ndefault_criterion = \"name\"\n");

        assert!(AppConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_map_keys_keep_their_case() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = sample_file(
            r#"
[directory]
url = "ldap://localhost"

[search.attributes]
phoneNumber = "telephoneNumber"

[search.filter_templates]
cityName = "(l={0})"

[classification]
reinit_value = "Restart"

[classification.term_map]
Restart = ["again"]
Done = ["done"]

[localization.messages.fr-FR]
invalidChoice = "Pardon ?"
"#,
        );

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(
            config.search.attributes.keys().collect::<Vec<_>>(),
            vec!["phoneNumber"]
        );
        assert_eq!(
            config.search.filter_templates.get("cityName").map(String::as_str),
            Some("(l={0})")
        );
        let term_map = config.classification.unwrap().term_map.unwrap();
        assert_eq!(term_map.keys().collect::<Vec<_>>(), vec!["Restart", "Done"]);
        assert_eq!(
            config.localization.messages["fr-FR"].get("invalidChoice").map(String::as_str),
            Some("Pardon ?")
        );
    }

    #[test]
    fn test_environment_value_keeps_file_key_case() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = sample_file(
            "[directory]\nurl = \"ldap://localhost\"\n[search.filter_templates]\ncityName = \"(l={0})\"\n",
        );

        env::set_var("DIRECTORY_BOT__SEARCH__FILTER_TEMPLATES__CITYNAME", "(l={0}*)");
        let result = AppConfig::load_from(file.path());
        env::remove_var("DIRECTORY_BOT__SEARCH__FILTER_TEMPLATES__CITYNAME");

        let config = result.unwrap();
        assert_eq!(
            config.search.filter_templates.get("cityName").map(String::as_str),
            Some("(l={0}*)")
        );
    }

    #[test]
    fn test_validate_rejects_bad_template() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = sample_file(
            "[directory]\nurl = \"ldap://localhost\"\n[search.filter_templates]\ncity = \"(l=Paris)\"\n",
        );

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::TemplateWithoutSlot("city".to_string()))
        );
    }
}
