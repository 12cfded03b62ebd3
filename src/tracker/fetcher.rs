//! Memoizing issue fetcher.
//!
//! Resolves ticket keys through an [`IssueSource`], storing successful
//! lookups in the caller's [`IssueCache`]. Each key hits the network at most
//! once per cache. Failures are logged and swallowed: a ticket the tracker
//! cannot return simply does not enrich the changelog.

use tracing::{error, info};

use crate::model::Issue;

use super::cache::IssueCache;
use super::source::IssueSource;

pub struct IssueFetcher<S> {
    source: S,
}

impl<S: IssueSource> IssueFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Return the cached issue for `key`, fetching it first if needed.
    ///
    /// `None` stands for the empty placeholder: the lookup failed and
    /// nothing was cached.
    pub async fn resolve<'c>(&self, cache: &'c mut IssueCache, key: &str) -> Option<&'c mut Issue> {
        if !cache.contains(key) {
            info!("Retrieving issue {key}");

            match self.source.fetch_issue(key).await {
                Ok(issue) => {
                    cache.insert(key, issue);
                }
                Err(e) => {
                    let status = e
                        .status()
                        .map_or_else(|| "no status".to_string(), |s| s.to_string());
                    error!(source = self.source.name(), error = %e, "Error while retrieving issue {key} [{status}]");
                    return None;
                }
            }
        }

        cache.get_mut(key)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory tracker that records every key it is asked for.
    pub(crate) struct FakeTracker {
        issues: HashMap<String, Issue>,
        pub(crate) calls: Mutex<Vec<String>>,
    }

    impl FakeTracker {
        pub(crate) fn new(issues: impl IntoIterator<Item = Issue>) -> Self {
            Self {
                issues: issues.into_iter().map(|i| (i.key.clone(), i)).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl IssueSource for FakeTracker {
        fn name(&self) -> &str {
            "fake"
        }

        async fn fetch_issue(&self, key: &str) -> Result<Issue> {
            self.calls.lock().unwrap().push(key.to_string());
            self.issues.get(key).cloned().ok_or_else(|| Error::Tracker {
                key: key.to_string(),
                status: Some(404),
                message: "Issue Does Not Exist".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_resolve_fetches_once_per_key() {
        let tracker = FakeTracker::new([Issue::new("COB-3", "Bug", "Crash")]);
        let fetcher = IssueFetcher::new(&tracker);
        let mut cache = IssueCache::new();

        let first = fetcher.resolve(&mut cache, "COB-3").await.cloned();
        let second = fetcher.resolve(&mut cache, "COB-3").await.cloned();

        assert_eq!(tracker.calls(), ["COB-3"]);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_returns_cached_object_without_network() {
        let tracker = FakeTracker::new([]);
        let fetcher = IssueFetcher::new(&tracker);
        let mut cache = IssueCache::new();
        cache.insert("COB-9", Issue::new("COB-9", "Task", "Seeded"));

        let issue = fetcher.resolve(&mut cache, "COB-9").await.unwrap();
        issue.summary = "Edited through the handle".to_string();

        assert!(tracker.calls().is_empty());
        assert_eq!(cache.get("COB-9").unwrap().summary, "Edited through the handle");
    }

    #[tokio::test]
    async fn test_failed_lookup_is_placeholder_and_not_cached() {
        let tracker = FakeTracker::new([]);
        let fetcher = IssueFetcher::new(&tracker);
        let mut cache = IssueCache::new();

        assert!(fetcher.resolve(&mut cache, "COB-404").await.is_none());
        assert!(fetcher.resolve(&mut cache, "COB-404").await.is_none());

        assert!(cache.is_empty());
        assert_eq!(tracker.calls(), ["COB-404", "COB-404"]);
    }
}
