//! Response processors exposed to the dialogue engine.

mod directory_search;
mod term_classification;

pub use directory_search::{DirectorySearchProcessor, SearchStateKeys};
pub use term_classification::TermClassificationProcessor;
