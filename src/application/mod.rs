//! Application layer: processors and their wiring.
//!
//! - `processors` - The two `ResponseProcessor` implementations
//! - `directory_search` - Scoped connect/search/disconnect with failure fallback
//! - `assembly` - Builds processors from `AppConfig`

mod assembly;
mod directory_search;
pub mod processors;

pub use assembly::{AssemblyError, Processors};
pub use directory_search::DirectorySearch;
pub use processors::{DirectorySearchProcessor, SearchStateKeys, TermClassificationProcessor};
