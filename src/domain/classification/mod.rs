//! Keyword classification of free-text answers.

mod classifier;
mod term_map;

pub use classifier::{Classifier, NoMatchingTerm, ReinitRule};
pub use term_map::{TermMap, TermMapError};
