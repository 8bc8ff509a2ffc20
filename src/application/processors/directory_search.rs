//! DirectorySearchProcessor - accumulates answers into a directory search.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::application::DirectorySearch;
use crate::domain::foundation::{
    DialogueState, InvalidResponseMessage, Locale, ProcessingError, StateKeys,
};
use crate::domain::search::{DirectoryRecord, SearchPolicy};
use crate::ports::{
    DirectoryModel, Localizer, ResponseProcessor, TemplateRenderer, DIRECTORY_TEMPLATE,
};

/// Dialogue state keys used by the search processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStateKeys {
    /// Names the criterion the current answer is for.
    pub search_field: String,
    /// Holds the accumulated search.
    pub search: String,
    /// Receives the rendered listing.
    pub show_directory: String,
}

/// Processor that folds each answer into the stored search, queries the
/// directory and stores the rendered result listing.
///
/// The answer itself is returned unchanged.
pub struct DirectorySearchProcessor {
    policy: SearchPolicy,
    keys: SearchStateKeys,
    invalid_response: InvalidResponseMessage,
    search: DirectorySearch,
    renderer: Arc<dyn TemplateRenderer>,
    localizer: Arc<dyn Localizer>,
}

impl DirectorySearchProcessor {
    pub fn new(
        policy: SearchPolicy,
        keys: SearchStateKeys,
        search: DirectorySearch,
        renderer: Arc<dyn TemplateRenderer>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            policy,
            keys,
            invalid_response: InvalidResponseMessage::default(),
            search,
            renderer,
            localizer,
        }
    }

    pub fn with_invalid_response(mut self, message: InvalidResponseMessage) -> Self {
        self.invalid_response = message;
        self
    }

    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    pub fn keys(&self) -> &SearchStateKeys {
        &self.keys
    }

    fn invalid_response(&self, locale: &Locale) -> String {
        self.invalid_response
            .resolve(|key| self.localizer.localize(key, locale))
    }

    async fn find_records(&self, filter: &str) -> Vec<DirectoryRecord> {
        self.search
            .find(filter)
            .await
            .iter()
            .map(|entry| self.policy.attributes.to_record(entry))
            .collect()
    }
}

#[async_trait]
impl ResponseProcessor for DirectorySearchProcessor {
    fn name(&self) -> &str {
        "directory_search"
    }

    fn state_keys(&self) -> StateKeys {
        StateKeys {
            reads: vec![self.keys.search_field.clone(), self.keys.search.clone()],
            writes: vec![self.keys.search.clone(), self.keys.show_directory.clone()],
        }
    }

    async fn process_response(
        &self,
        response: &str,
        locale: &Locale,
        state: &mut DialogueState,
    ) -> Result<String, ProcessingError> {
        if response.is_empty() {
            return Err(ProcessingError::not_understood(
                self.invalid_response(locale),
            ));
        }

        let update = self.policy.accumulate(
            state.get_non_empty(&self.keys.search),
            state.get(&self.keys.search_field),
            response,
        );
        debug!(stored = %update.stored, filter = %update.filter, "Search accumulated");
        state.set(self.keys.search.clone(), update.stored);

        let model = DirectoryModel {
            columns: self.policy.attributes.keys().map(String::from).collect(),
            persons: self.find_records(&update.filter).await,
            criteria: update.criteria,
        };
        let listing = self
            .renderer
            .render(DIRECTORY_TEMPLATE, &model)
            .map_err(|e| ProcessingError::processing(e.to_string()))?;
        state.set(self.keys.show_directory.clone(), listing);

        Ok(response.to_string())
    }
}
