//! Directory Bot - Response processors for a conversational bot
//!
//! This crate implements two processors called by a dialogue engine: one
//! that classifies free-text answers against keyword lists, and one that
//! accumulates answers into a directory (LDAP) search and renders the
//! matching people.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
