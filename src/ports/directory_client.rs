//! Directory Client Port - connection and search against a directory service.
//!
//! A connection is acquired for one search and must be released with
//! [`DirectoryConnection::disconnect`] on every path, including failures.

use async_trait::async_trait;
use futures::stream::BoxStream;
use secrecy::SecretString;
use thiserror::Error;

use crate::domain::search::SearchEntry;

/// Errors reported by a directory client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// The directory could not be reached or the link dropped.
    #[error("Directory communication failure: {0}")]
    Communication(String),

    /// The directory rejected the request (bad filter, bind refused, ...).
    #[error("Directory protocol failure: {0}")]
    Protocol(String),
}

impl DirectoryError {
    pub fn communication(message: impl Into<String>) -> Self {
        DirectoryError::Communication(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        DirectoryError::Protocol(message.into())
    }

    pub fn is_communication(&self) -> bool {
        matches!(self, DirectoryError::Communication(_))
    }
}

/// Search depth below the base DN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Subtree,
    OneLevel,
}

impl SearchScope {
    pub fn from_subtree_flag(subtree: bool) -> Self {
        if subtree {
            SearchScope::Subtree
        } else {
            SearchScope::OneLevel
        }
    }
}

/// Parameters needed to open a connection.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    pub provider: String,
    pub url: String,
    pub bind_dn: String,
    pub bind_password: SecretString,
    pub search_base: String,
    pub scope: SearchScope,
}

/// Lazy, single-pass sequence of search results.
pub type EntryStream = BoxStream<'static, Result<SearchEntry, DirectoryError>>;

/// Port for opening directory connections.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Opens and binds a connection.
    async fn connect(
        &self,
        params: &ConnectionParams,
    ) -> Result<Box<dyn DirectoryConnection>, DirectoryError>;
}

/// An open directory connection.
#[async_trait]
pub trait DirectoryConnection: Send {
    /// Runs a search; results may be produced lazily.
    async fn search(
        &mut self,
        filter: &str,
        base: &str,
        scope: SearchScope,
    ) -> Result<EntryStream, DirectoryError>;

    /// Releases the connection.
    async fn disconnect(self: Box<Self>) -> Result<(), DirectoryError>;
}
