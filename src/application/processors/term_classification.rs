//! TermClassificationProcessor - maps an answer onto a canonical value.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::classification::Classifier;
use crate::domain::foundation::{
    DialogueState, InvalidResponseMessage, Locale, ProcessingError, StateKeys,
};
use crate::ports::{Localizer, ResponseProcessor};

/// Processor backed by a keyword [`Classifier`].
///
/// Returns the canonical value of the first matching term. On success the
/// loop rule keys (and, for the reinit value, the search key) are cleared
/// from the dialogue state.
pub struct TermClassificationProcessor {
    classifier: Classifier,
    invalid_response: InvalidResponseMessage,
    localizer: Arc<dyn Localizer>,
}

impl TermClassificationProcessor {
    pub fn new(
        classifier: Classifier,
        invalid_response: InvalidResponseMessage,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            classifier,
            invalid_response,
            localizer,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    fn invalid_response(&self, locale: &Locale) -> String {
        self.invalid_response
            .resolve(|key| self.localizer.localize(key, locale))
    }
}

#[async_trait]
impl ResponseProcessor for TermClassificationProcessor {
    fn name(&self) -> &str {
        "term_classification"
    }

    fn state_keys(&self) -> StateKeys {
        let mut writes = self.classifier.loop_rules().to_vec();
        if let Some(rule) = self.classifier.reinit() {
            writes.push(rule.state_key.clone());
        }
        StateKeys {
            reads: Vec::new(),
            writes,
        }
    }

    async fn process_response(
        &self,
        response: &str,
        locale: &Locale,
        state: &mut DialogueState,
    ) -> Result<String, ProcessingError> {
        match self.classifier.classify(response, state) {
            Ok(value) => {
                debug!(value = %value, "Response classified");
                Ok(value)
            }
            Err(_) => {
                debug!(response, "No trigger term matched");
                Err(ProcessingError::not_understood(
                    self.invalid_response(locale),
                ))
            }
        }
    }
}
