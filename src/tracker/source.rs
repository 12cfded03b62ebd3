//! Issue source trait.
//!
//! Defines the interface the fetcher uses to look up a single issue.
//! Uses async methods for HTTP-based trackers.

use crate::error::Result;
use crate::model::Issue;

/// Trait for issue trackers.
///
/// Implemented by [`super::JiraClient`]; tests supply in-memory sources.
pub trait IssueSource: Send + Sync {
    /// Short tracker name for logs.
    fn name(&self) -> &str;

    /// Fetch one issue by its project-prefixed key.
    fn fetch_issue(&self, key: &str) -> impl std::future::Future<Output = Result<Issue>> + Send;
}

impl<S: IssueSource> IssueSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_issue(&self, key: &str) -> impl std::future::Future<Output = Result<Issue>> + Send {
        (**self).fetch_issue(key)
    }
}
