//! Tracker issue model.
//!
//! An `Issue` is the slice of tracker metadata the release notes need:
//! key, type, summary and a priority symbol. Parents collect the subtasks
//! referenced by commits in the same run.

use serde::{Deserialize, Serialize};

/// Priority symbols keyed by tracker priority level (1 = highest).
const PRIORITY_SYMBOLS: [&str; 5] = [
    ":arrow_up:",
    ":arrow_double_up:",
    ":arrow_up_small:",
    ":arrow_double_down:",
    ":arrow_down_small:",
];

/// Map a tracker priority id (`"1"`..`"5"`) to its symbol.
///
/// Returns `None` for ids outside the fixed five-level range.
#[must_use]
pub fn priority_symbol(id: &str) -> Option<&'static str> {
    let level: usize = id.trim().parse().ok()?;
    PRIORITY_SYMBOLS.get(level.checked_sub(1)?).copied()
}

/// An issue resolved from the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Project-prefixed key, e.g. `COB-123`
    pub key: String,

    /// Issue type name (Bug, Story, Sub-task, ...)
    #[serde(rename = "type")]
    pub issue_type: String,

    pub summary: String,

    /// Priority symbol, absent when the tracker level is out of range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(default)]
    pub subtask: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,

    /// Subtasks referenced in this run, in the order they were found
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Issue>,
}

impl Issue {
    /// Create a top-level issue with no priority.
    pub fn new(key: impl Into<String>, issue_type: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            issue_type: issue_type.into(),
            summary: summary.into(),
            priority: None,
            subtask: false,
            parent_key: None,
            subtasks: Vec::new(),
        }
    }

    /// Mark this issue as a subtask of `parent_key`.
    #[must_use]
    pub fn subtask_of(mut self, parent_key: impl Into<String>) -> Self {
        self.subtask = true;
        self.parent_key = Some(parent_key.into());
        self
    }

    /// Set the priority symbol from a tracker priority id.
    #[must_use]
    pub fn with_priority_id(mut self, id: &str) -> Self {
        self.priority = priority_symbol(id).map(String::from);
        self
    }

    /// Append a subtask unless one with the same key is already listed.
    pub fn push_subtask(&mut self, subtask: Issue) {
        if !self.subtasks.iter().any(|s| s.key == subtask.key) {
            self.subtasks.push(subtask);
        }
    }
}
