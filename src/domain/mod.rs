//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (dialogue state, locale, errors)
//! - `classification` - Keyword classification of free-text answers
//! - `search` - Search token accumulation, filter assembly, result records

pub mod classification;
pub mod foundation;
pub mod search;
