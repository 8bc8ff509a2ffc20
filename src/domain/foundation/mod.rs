//! Shared domain primitives: dialogue state, locale, messages and errors.

mod errors;
mod locale;
mod message;
mod state;

pub use errors::ProcessingError;
pub use locale::Locale;
pub use message::InvalidResponseMessage;
pub use state::{DialogueState, StateKeys};
