//! In-memory directory implementation.
//!
//! This adapter provides an in-memory implementation of the `DirectoryClient`
//! port. Useful for:
//! - Development without a reachable LDAP server
//! - Testing the processors end to end
//!
//! Filters are really evaluated (see [`LdapFilter`]), base DN and scope are
//! honoured, and failures can be injected at each step of the connection
//! lifecycle. Every search is recorded for verification.
//!
//! # Example
//!
//! ```ignore
//! let directory = InMemoryDirectory::new()
//!     .with_entry(SearchEntry::new("uid=jd,ou=people,dc=example,dc=org")
//!         .with_attribute("cn", "Jean Dupont"));
//!
//! let mut conn = directory.connect(&params).await?;
//! let results = conn.search("(cn=Jean*)", "ou=people,dc=example,dc=org", SearchScope::Subtree).await?;
//! ```

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::{Arc, Mutex};

use super::filter_eval::LdapFilter;
use crate::domain::search::SearchEntry;
use crate::ports::{
    ConnectionParams, DirectoryClient, DirectoryConnection, DirectoryError, EntryStream,
    SearchScope,
};

/// A search issued against the in-memory directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSearch {
    pub filter: String,
    pub base: String,
    pub scope: SearchScope,
}

#[derive(Debug, Default)]
struct DirectoryState {
    entries: Vec<SearchEntry>,
    connect_error: Option<DirectoryError>,
    search_error: Option<DirectoryError>,
    disconnect_error: Option<DirectoryError>,
    searches: Vec<RecordedSearch>,
    connects: usize,
    disconnects: usize,
}

/// In-memory implementation of the DirectoryClient port.
///
/// Cloning shares the underlying entries and call history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<Mutex<DirectoryState>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    pub fn with_entry(self, entry: SearchEntry) -> Self {
        self.state.lock().unwrap().entries.push(entry);
        self
    }

    /// Adds several entries.
    pub fn with_entries(self, entries: impl IntoIterator<Item = SearchEntry>) -> Self {
        self.state.lock().unwrap().entries.extend(entries);
        self
    }

    /// Makes every `connect` fail with `error`.
    pub fn failing_connect(self, error: DirectoryError) -> Self {
        self.state.lock().unwrap().connect_error = Some(error);
        self
    }

    /// Makes every `search` fail with `error`.
    pub fn failing_search(self, error: DirectoryError) -> Self {
        self.state.lock().unwrap().search_error = Some(error);
        self
    }

    /// Makes every `disconnect` fail with `error`.
    pub fn failing_disconnect(self, error: DirectoryError) -> Self {
        self.state.lock().unwrap().disconnect_error = Some(error);
        self
    }

    /// Searches issued so far.
    pub fn searches(&self) -> Vec<RecordedSearch> {
        self.state.lock().unwrap().searches.clone()
    }

    /// Number of successful connections.
    pub fn connect_count(&self) -> usize {
        self.state.lock().unwrap().connects
    }

    /// Number of disconnect calls, failed or not.
    pub fn disconnect_count(&self) -> usize {
        self.state.lock().unwrap().disconnects
    }

    /// Connections opened and not yet released.
    pub fn open_connections(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.connects.saturating_sub(state.disconnects)
    }
}

#[async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn connect(
        &self,
        params: &ConnectionParams,
    ) -> Result<Box<dyn DirectoryConnection>, DirectoryError> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = &state.connect_error {
            return Err(err.clone());
        }
        state.connects += 1;
        tracing::debug!(url = %params.url, bind_dn = %params.bind_dn, "In-memory directory connected");

        Ok(Box::new(InMemoryConnection {
            state: Arc::clone(&self.state),
        }))
    }
}

struct InMemoryConnection {
    state: Arc<Mutex<DirectoryState>>,
}

#[async_trait]
impl DirectoryConnection for InMemoryConnection {
    async fn search(
        &mut self,
        filter: &str,
        base: &str,
        scope: SearchScope,
    ) -> Result<EntryStream, DirectoryError> {
        let mut state = self.state.lock().unwrap();
        state.searches.push(RecordedSearch {
            filter: filter.to_string(),
            base: base.to_string(),
            scope,
        });
        if let Some(err) = &state.search_error {
            return Err(err.clone());
        }

        let parsed = LdapFilter::parse(filter)
            .map_err(|e| DirectoryError::protocol(format!("invalid filter '{}': {}", filter, e)))?;

        let results: Vec<Result<SearchEntry, DirectoryError>> = state
            .entries
            .iter()
            .filter(|entry| in_scope(&entry.dn, base, scope))
            .filter(|entry| parsed.matches(entry))
            .cloned()
            .map(Ok)
            .collect();

        Ok(stream::iter(results).boxed())
    }

    async fn disconnect(self: Box<Self>) -> Result<(), DirectoryError> {
        let mut state = self.state.lock().unwrap();
        state.disconnects += 1;
        match &state.disconnect_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn in_scope(dn: &str, base: &str, scope: SearchScope) -> bool {
    let dn = dn.to_lowercase();
    let base = base.to_lowercase();
    match scope {
        SearchScope::Subtree => {
            base.is_empty() || dn == base || dn.ends_with(&format!(",{}", base))
        }
        SearchScope::OneLevel => {
            let parent = dn.split_once(',').map(|(_, p)| p).unwrap_or("");
            parent == base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    const BASE: &str = "ou=people,dc=example,dc=org";

    fn params() -> ConnectionParams {
        ConnectionParams {
            provider: "in-memory".to_string(),
            url: "ldap://localhost:389".to_string(),
            bind_dn: "cn=admin,dc=example,dc=org".to_string(),
            bind_password: Secret::new("secret".to_string()),
            search_base: BASE.to_string(),
            scope: SearchScope::Subtree,
        }
    }

    fn directory() -> InMemoryDirectory {
        InMemoryDirectory::new().with_entries([
            SearchEntry::new("uid=jd,ou=people,dc=example,dc=org")
                .with_attribute("cn", "Jean Dupont")
                .with_attribute("l", "Paris"),
            SearchEntry::new("uid=md,ou=interns,ou=people,dc=example,dc=org")
                .with_attribute("cn", "Marie Durand")
                .with_attribute("l", "Paris"),
            SearchEntry::new("uid=pm,ou=partners,dc=example,dc=org")
                .with_attribute("cn", "Paul Martin")
                .with_attribute("l", "Paris"),
        ])
    }

    async fn search(dir: &InMemoryDirectory, filter: &str, scope: SearchScope) -> Vec<String> {
        let mut conn = dir.connect(&params()).await.unwrap();
        let results: Vec<_> = conn
            .search(filter, BASE, scope)
            .await
            .unwrap()
            .collect()
            .await;
        conn.disconnect().await.unwrap();
        results.into_iter().map(|r| r.unwrap().dn).collect()
    }

    #[tokio::test]
    async fn subtree_includes_nested_entries() {
        let dns = search(&directory(), "(l=Paris)", SearchScope::Subtree).await;
        assert_eq!(dns.len(), 2);
    }

    #[tokio::test]
    async fn one_level_excludes_nested_entries() {
        let dns = search(&directory(), "(l=Paris)", SearchScope::OneLevel).await;
        assert_eq!(dns, vec!["uid=jd,ou=people,dc=example,dc=org"]);
    }

    #[tokio::test]
    async fn filter_is_evaluated() {
        let dns = search(&directory(), "(&(cn=*dur*)(l=Paris))", SearchScope::Subtree).await;
        assert_eq!(dns, vec!["uid=md,ou=interns,ou=people,dc=example,dc=org"]);
    }

    #[tokio::test]
    async fn records_searches_and_balances_connections() {
        let dir = directory();
        search(&dir, "(cn=Jean*)", SearchScope::Subtree).await;

        assert_eq!(dir.connect_count(), 1);
        assert_eq!(dir.disconnect_count(), 1);
        assert_eq!(dir.open_connections(), 0);
        assert_eq!(
            dir.searches(),
            vec![RecordedSearch {
                filter: "(cn=Jean*)".to_string(),
                base: BASE.to_string(),
                scope: SearchScope::Subtree,
            }]
        );
    }

    #[tokio::test]
    async fn invalid_filter_is_protocol_error() {
        let dir = directory();
        let mut conn = dir.connect(&params()).await.unwrap();
        let err = conn.search("", BASE, SearchScope::Subtree).await.err().unwrap();
        assert!(matches!(err, DirectoryError::Protocol(_)));
    }

    #[tokio::test]
    async fn injected_failures() {
        let dir = directory().failing_connect(DirectoryError::communication("refused"));
        assert!(dir.connect(&params()).await.is_err());
        assert_eq!(dir.connect_count(), 0);

        let dir = directory().failing_search(DirectoryError::communication("timeout"));
        let mut conn = dir.connect(&params()).await.unwrap();
        assert!(conn.search("(cn=*)", BASE, SearchScope::Subtree).await.is_err());

        let dir = directory().failing_disconnect(DirectoryError::protocol("unbind"));
        let conn = dir.connect(&params()).await.unwrap();
        assert!(conn.disconnect().await.is_err());
        assert_eq!(dir.disconnect_count(), 1);
    }
}
