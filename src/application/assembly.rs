//! Builds the processors from configuration.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use super::processors::{DirectorySearchProcessor, SearchStateKeys, TermClassificationProcessor};
use super::DirectorySearch;
use crate::adapters::HtmlTableRenderer;
use crate::config::{AppConfig, ValidationError};
use crate::domain::classification::{Classifier, ReinitRule, TermMapError};
use crate::ports::{DirectoryClient, Localizer, TemplateRenderer};

/// Errors that can occur while assembling processors.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("Term map unavailable: {0}")]
    TermMap(#[from] TermMapError),
}

/// The processors configured for one bot.
pub struct Processors {
    /// Present when a `classification` section is configured.
    pub classification: Option<TermClassificationProcessor>,
    pub directory_search: DirectorySearchProcessor,
}

impl Processors {
    /// Validates `config` and wires the processors to the given ports.
    pub fn from_config(
        config: &AppConfig,
        directory: Arc<dyn DirectoryClient>,
        renderer: Arc<dyn TemplateRenderer>,
        localizer: Arc<dyn Localizer>,
    ) -> Result<Self, AssemblyError> {
        config.validate()?;

        let classification = match &config.classification {
            Some(section) => {
                let terms = section.load_term_map()?;
                info!(values = terms.len(), "Term map loaded");

                let mut classifier = Classifier::new(terms).with_loop_rules(section.loop_rules.clone());
                if let Some(value) = &section.reinit_value {
                    if classifier.terms().terms_of(value).is_none() {
                        return Err(ValidationError::UnknownReinitValue(value.clone()).into());
                    }
                    let state_key = section
                        .reinit_state_key
                        .clone()
                        .unwrap_or_else(|| config.search_processor.search_key.clone());
                    classifier = classifier.with_reinit(ReinitRule::new(value.clone(), state_key));
                }

                Some(TermClassificationProcessor::new(
                    classifier,
                    section.invalid_response.clone(),
                    Arc::clone(&localizer),
                ))
            }
            None => None,
        };

        let keys = SearchStateKeys {
            search_field: config.search_processor.search_field_key.clone(),
            search: config.search_processor.search_key.clone(),
            show_directory: config.search_processor.show_directory_key.clone(),
        };
        let directory_search = DirectorySearchProcessor::new(
            config.search.policy(),
            keys,
            DirectorySearch::new(directory, config.directory.connection_params()),
            renderer,
            localizer,
        )
        .with_invalid_response(config.search_processor.invalid_response.clone());

        Ok(Self {
            classification,
            directory_search,
        })
    }

    /// Wires the processors with the built-in renderer and the localizer
    /// described by the configuration.
    pub fn with_default_adapters(
        config: &AppConfig,
        directory: Arc<dyn DirectoryClient>,
    ) -> Result<Self, AssemblyError> {
        Self::from_config(
            config,
            directory,
            Arc::new(HtmlTableRenderer::new()),
            Arc::new(config.localization.localizer()),
        )
    }
}
