//! Context finalization.
//!
//! Replaces the writer's commit groups with the run's top-level issues,
//! grouped by issue type, and empties the issue cache.

use tracing::debug;

use crate::model::{CommitGroup, Issue, WriterContext};
use crate::tracker::IssueCache;

/// Group the cached non-subtask issues by type and swap them into `context`.
///
/// Groups appear in the order their type was first seen in the cache, and
/// issues keep their resolution order inside a group. The cache is empty
/// afterwards.
pub fn finalize_context<G>(cache: &mut IssueCache, context: WriterContext<G>) -> WriterContext<Issue> {
    let mut groups: Vec<CommitGroup<Issue>> = Vec::new();

    for issue in cache.drain() {
        if issue.subtask {
            continue;
        }
        match groups.iter_mut().find(|g| g.title == issue.issue_type) {
            Some(group) => group.commits.push(issue),
            None => groups.push(CommitGroup {
                title: issue.issue_type.clone(),
                commits: vec![issue],
            }),
        }
    }

    debug!(groups = groups.len(), "Finalized commit groups");
    context.with_commit_groups(groups)
}
