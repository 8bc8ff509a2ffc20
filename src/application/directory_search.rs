//! Scoped directory search.
//!
//! A connection is opened for each search and released on every path. Any
//! directory failure is logged and turned into an empty result so that the
//! dialogue carries on with an empty listing.

use futures::TryStreamExt;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::domain::search::SearchEntry;
use crate::ports::{ConnectionParams, DirectoryClient, DirectoryConnection, DirectoryError};

/// Runs person searches against the configured directory.
#[derive(Clone)]
pub struct DirectorySearch {
    client: Arc<dyn DirectoryClient>,
    params: ConnectionParams,
}

impl DirectorySearch {
    pub fn new(client: Arc<dyn DirectoryClient>, params: ConnectionParams) -> Self {
        Self { client, params }
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// Returns the entries matching `filter`, or nothing on failure.
    ///
    /// An empty filter matches nothing and the directory is not contacted.
    pub async fn find(&self, filter: &str) -> Vec<SearchEntry> {
        if filter.is_empty() {
            debug!("Empty search filter, skipping directory search");
            return Vec::new();
        }

        info!(filter, base = %self.params.search_base, "Search persons");

        match self.try_find(filter).await {
            Ok(entries) => {
                debug!(count = entries.len(), "Directory search completed");
                entries
            }
            Err(err @ DirectoryError::Communication(_)) => {
                error!(
                    error = %err,
                    person_base = %self.params.search_base,
                    person_search = filter,
                    "Error while searching for persons"
                );
                Vec::new()
            }
            Err(err) => {
                error!(error = %err, "Error while searching for persons");
                Vec::new()
            }
        }
    }

    async fn try_find(&self, filter: &str) -> Result<Vec<SearchEntry>, DirectoryError> {
        let mut connection = self.client.connect(&self.params).await?;
        let result = self.collect(connection.as_mut(), filter).await;

        if let Err(err) = connection.disconnect().await {
            debug!(error = %err, "Ignoring directory disconnect failure");
        }

        result
    }

    async fn collect(
        &self,
        connection: &mut dyn DirectoryConnection,
        filter: &str,
    ) -> Result<Vec<SearchEntry>, DirectoryError> {
        let entries = connection
            .search(filter, &self.params.search_base, self.params.scope)
            .await?;
        entries.try_collect().await
    }
}
