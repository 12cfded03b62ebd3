//! Writer context handed to the templates.
//!
//! The context is generic over its commit group members. The writer builds a
//! `WriterContext<CommitRecord>` from the parsed commits; finalization swaps the
//! groups for issues and yields a `WriterContext<Issue>`.

use serde::{Deserialize, Serialize};

use super::commit::Note;

/// A titled bucket of commits or issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitGroup<T> {
    pub title: String,
    pub commits: Vec<T>,
}

/// Notes sharing one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteGroup {
    pub title: String,
    pub notes: Vec<Note>,
}

/// Release metadata supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseMeta {
    pub version: Option<String>,
    pub title: Option<String>,
    /// Release date; today's UTC date when not set
    pub date: Option<String>,
    /// Tracker browse base, e.g. `https://jira.example.com/browse/`
    pub tracker_url: Option<String>,
}

/// Template context for one release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterContext<G> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker_url: Option<String>,
    pub commit_groups: Vec<CommitGroup<G>>,
    pub note_groups: Vec<NoteGroup>,
}

impl<G> WriterContext<G> {
    /// Create an empty context for a release.
    pub fn new(meta: ReleaseMeta) -> Self {
        Self {
            version: meta.version,
            title: meta.title,
            date: meta
                .date
                .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string()),
            tracker_url: meta.tracker_url,
            commit_groups: Vec::new(),
            note_groups: Vec::new(),
        }
    }

    /// Replace the commit groups, possibly with a different member type.
    pub fn with_commit_groups<H>(self, commit_groups: Vec<CommitGroup<H>>) -> WriterContext<H> {
        WriterContext {
            version: self.version,
            title: self.title,
            date: self.date,
            tracker_url: self.tracker_url,
            commit_groups,
            note_groups: self.note_groups,
        }
    }
}
