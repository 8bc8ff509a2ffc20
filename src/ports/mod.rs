//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ResponseProcessor` - Entry point called by the dialogue engine
//! - `DirectoryClient` / `DirectoryConnection` - Directory (LDAP) access
//! - `Localizer` - Localized message lookup
//! - `TemplateRenderer` - HTML rendering of directory results

mod directory_client;
mod localizer;
mod response_processor;
mod template_renderer;

pub use directory_client::{
    ConnectionParams, DirectoryClient, DirectoryConnection, DirectoryError, EntryStream,
    SearchScope,
};
pub use localizer::Localizer;
pub use response_processor::ResponseProcessor;
pub use template_renderer::{DirectoryModel, RenderError, TemplateRenderer, DIRECTORY_TEMPLATE};
