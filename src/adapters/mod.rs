//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `directory` - In-memory directory with RFC 4515 filter evaluation
//! - `localization` - Message bundles held in memory
//! - `rendering` - Fixed-layout HTML rendering of directory results

pub mod directory;
pub mod localization;
pub mod rendering;

pub use directory::{InMemoryDirectory, LdapFilter, RecordedSearch};
pub use localization::StaticLocalizer;
pub use rendering::HtmlTableRenderer;
