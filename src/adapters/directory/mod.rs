//! Directory adapters.

mod filter_eval;
mod in_memory;

pub use filter_eval::{FilterParseError, LdapFilter};
pub use in_memory::{InMemoryDirectory, RecordedSearch};
