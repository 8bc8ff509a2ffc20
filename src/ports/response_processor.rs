//! Response Processor Port - the single entry point used by the dialogue engine.

use async_trait::async_trait;

use crate::domain::foundation::{DialogueState, Locale, ProcessingError, StateKeys};

/// Port for processing one user answer.
///
/// The dialogue engine owns the state and lends it for the duration of the
/// call. Implementations only touch the keys they report in
/// [`ResponseProcessor::state_keys`].
#[async_trait]
pub trait ResponseProcessor: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Dialogue state keys read and written by this processor.
    fn state_keys(&self) -> StateKeys;

    /// Processes `response` and returns the value to record for it.
    ///
    /// # Errors
    ///
    /// - `ResponseNotUnderstood` when the user must be asked again
    /// - `ResponseProcessing` on unexpected failure
    async fn process_response(
        &self,
        response: &str,
        locale: &Locale,
        state: &mut DialogueState,
    ) -> Result<String, ProcessingError>;
}
