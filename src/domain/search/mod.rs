//! Directory search accumulation: tokens, filters and result records.

mod criteria;
mod escape;
mod filter;
mod record;
mod strategy;

pub use criteria::{append_token, SearchCriteria, SearchToken};
pub use escape::{escape_filter_value, unescape_filter_value};
pub use filter::{build_filter, fill_template, wrap_conjunction, FilterTemplates, VALUE_SLOT};
pub use record::{AttributeMapping, DirectoryRecord, SearchEntry};
pub use strategy::{FilterStrategy, SearchPolicy, SearchUpdate, DEFAULT_CRITERION};
