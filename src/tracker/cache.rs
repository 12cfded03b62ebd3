//! Per-run issue cache.
//!
//! Holds every issue resolved while transforming one release's commits.
//! Insertion order is preserved so grouping is deterministic. The cache is
//! owned by the caller and passed by `&mut`; finalization drains it.

use std::collections::HashMap;

use crate::model::Issue;

#[derive(Debug, Default)]
pub struct IssueCache {
    issues: Vec<Issue>,
    index: HashMap<String, usize>,
}

impl IssueCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Issue> {
        self.index.get(key).map(|&i| &self.issues[i])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Issue> {
        self.index.get(key).map(|&i| &mut self.issues[i])
    }

    /// Store an issue under `key`. An existing entry is kept untouched.
    pub fn insert(&mut self, key: impl Into<String>, issue: Issue) -> &mut Issue {
        let key = key.into();
        let slot = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                self.issues.push(issue);
                let i = self.issues.len() - 1;
                self.index.insert(key, i);
                i
            }
        };
        &mut self.issues[slot]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Take every issue out in insertion order, leaving the cache empty.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Issue> {
        self.index.clear();
        self.issues.drain(..)
    }
}
