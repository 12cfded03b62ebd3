//! Per-commit transform.
//!
//! Relabels breaking-change notes, resolves referenced tickets into the
//! run's issue cache and shortens the hash. Resolved issues are not attached
//! to the commit; the finalizer reads them back from the cache.

use tracing::{info, warn};

use crate::model::CommitRecord;
use crate::tracker::{IssueCache, IssueSource};

use super::Preset;

/// Title every breaking-change note is grouped under.
pub const BREAKING_CHANGES_TITLE: &str = "BREAKING CHANGES";

/// Length of the abbreviated commit hash.
pub const SHORT_HASH_LEN: usize = 7;

/// Build a full ticket key from a reference's numeric-like suffix.
///
/// Leading whitespace is skipped and only the leading digits count, so
/// `"0042"` and `"42abc"` both give `COB-42`. Returns `None` when no digits
/// lead the value.
#[must_use]
pub fn ticket_key(prefix: &str, issue: &str) -> Option<String> {
    let digits: String = issue
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    let number = digits.trim_start_matches('0');
    let number = if number.is_empty() { "0" } else { number };
    Some(format!("{prefix}{number}"))
}

/// Shorten a hash to its first seven characters.
pub fn shorten_hash(hash: &mut String) {
    if let Some((idx, _)) = hash.char_indices().nth(SHORT_HASH_LEN) {
        hash.truncate(idx);
    }
}

impl<S: IssueSource> Preset<S> {
    /// Transform one parsed commit, resolving its tickets into `cache`.
    pub async fn transform(&self, cache: &mut IssueCache, mut commit: CommitRecord) -> CommitRecord {
        for note in &mut commit.notes {
            note.title = BREAKING_CHANGES_TITLE.to_string();
        }

        for reference in &commit.references {
            info!("Found reference {}", reference.issue);

            let Some(key) = ticket_key(&self.issue_prefix, &reference.issue) else {
                warn!(issue = %reference.issue, "Reference has no ticket number, skipping");
                continue;
            };

            // Keys seen earlier in the run are skipped outright.
            if cache.contains(&key) {
                continue;
            }

            let Some(issue) = self.fetcher.resolve(cache, &key).await else {
                continue;
            };
            if !issue.subtask {
                continue;
            }

            let subtask = issue.clone();
            let Some(parent_key) = subtask.parent_key.clone() else {
                warn!(key = %subtask.key, "Subtask has no parent key");
                continue;
            };
            if let Some(parent) = self.fetcher.resolve(cache, &parent_key).await {
                parent.push_subtask(subtask);
            }
        }

        if let Some(hash) = commit.hash.as_mut() {
            shorten_hash(hash);
        }

        commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Issue, Note, Reference};
    use crate::preset::Preset;
    use crate::tracker::fetcher::tests::FakeTracker;

    fn commit_with_refs(refs: &[&str]) -> CommitRecord {
        CommitRecord {
            hash: Some("0123456789abcdef0123456789abcdef01234567".to_string()),
            header: "feat: something".to_string(),
            references: refs.iter().map(|r| Reference::new(*r)).collect(),
            ..CommitRecord::default()
        }
    }

    fn tracker() -> FakeTracker {
        FakeTracker::new([
            Issue::new("COB-1", "Sub-task", "Child work").subtask_of("COB-2"),
            Issue::new("COB-2", "Story", "Parent story"),
            Issue::new("COB-3", "Bug", "Crash on save"),
            Issue::new("COB-4", "Sub-task", "Orphaned child").subtask_of("COB-99"),
        ])
    }

    #[test]
    fn test_ticket_key_parses_leading_digits() {
        assert_eq!(ticket_key("COB-", "42").as_deref(), Some("COB-42"));
        assert_eq!(ticket_key("COB-", "0042").as_deref(), Some("COB-42"));
        assert_eq!(ticket_key("COB-", " 7x").as_deref(), Some("COB-7"));
        assert_eq!(ticket_key("COB-", "000").as_deref(), Some("COB-0"));
        assert_eq!(ticket_key("COB-", "abc"), None);
        assert_eq!(ticket_key("COB-", ""), None);
    }

    #[test]
    fn test_shorten_hash() {
        let mut hash = "0123456789abcdef0123456789abcdef01234567".to_string();
        shorten_hash(&mut hash);
        assert_eq!(hash, "0123456");

        let mut short = "abc".to_string();
        shorten_hash(&mut short);
        assert_eq!(short, "abc");
    }

    #[tokio::test]
    async fn test_hash_truncated_and_missing_hash_untouched() {
        let tracker = tracker();
        let preset = Preset::new(&tracker);
        let mut cache = IssueCache::new();

        let commit = preset.transform(&mut cache, commit_with_refs(&[])).await;
        assert_eq!(commit.hash.as_deref(), Some("0123456"));

        let no_hash = CommitRecord {
            header: "chore: tidy".to_string(),
            ..CommitRecord::default()
        };
        let transformed = preset.transform(&mut cache, no_hash.clone()).await;
        assert_eq!(transformed, no_hash);
    }

    #[tokio::test]
    async fn test_notes_are_relabelled() {
        let tracker = tracker();
        let preset = Preset::new(&tracker);
        let mut cache = IssueCache::new();
        let mut commit = commit_with_refs(&[]);
        commit.notes = vec![
            Note { title: "BREAKING CHANGE".into(), text: "a".into() },
            Note { title: "BREAKING CHANGES".into(), text: "b".into() },
        ];

        let commit = preset.transform(&mut cache, commit).await;

        assert!(commit.notes.iter().all(|n| n.title == BREAKING_CHANGES_TITLE));
        assert_eq!(commit.notes[1].text, "b");
    }

    #[tokio::test]
    async fn test_subtask_is_attached_to_parent_once() {
        let tracker = tracker();
        let preset = Preset::new(&tracker);
        let mut cache = IssueCache::new();

        let commit = preset.transform(&mut cache, commit_with_refs(&["1"])).await;
        preset.transform(&mut cache, commit_with_refs(&["1", "01"])).await;

        let parent = cache.get("COB-2").unwrap();
        assert_eq!(parent.subtasks.len(), 1);
        assert_eq!(parent.subtasks[0].key, "COB-1");
        assert_eq!(tracker.calls(), ["COB-1", "COB-2"]);
        // References stay as parsed.
        assert_eq!(commit.references, vec![Reference::new("1")]);
    }

    #[tokio::test]
    async fn test_cached_key_is_skipped() {
        let tracker = tracker();
        let preset = Preset::new(&tracker);
        let mut cache = IssueCache::new();

        preset.transform(&mut cache, commit_with_refs(&["3"])).await;
        preset.transform(&mut cache, commit_with_refs(&["3", "3"])).await;

        assert_eq!(tracker.calls(), ["COB-3"]);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_parent_keeps_subtask_cached_only() {
        let tracker = tracker();
        let preset = Preset::new(&tracker);
        let mut cache = IssueCache::new();

        preset.transform(&mut cache, commit_with_refs(&["4"])).await;

        assert_eq!(tracker.calls(), ["COB-4", "COB-99"]);
        assert!(cache.contains("COB-4"));
        assert!(!cache.contains("COB-99"));
    }

    #[tokio::test]
    async fn test_failed_lookup_does_not_abort() {
        let tracker = tracker();
        let preset = Preset::new(&tracker);
        let mut cache = IssueCache::new();

        let commit = preset
            .transform(&mut cache, commit_with_refs(&["500", "3", "nope"]))
            .await;

        assert_eq!(commit.hash.as_deref(), Some("0123456"));
        assert_eq!(tracker.calls(), ["COB-500", "COB-3"]);
        assert!(cache.contains("COB-3"));
    }
}
