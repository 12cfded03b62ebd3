//! Writer options and context building.
//!
//! Mirrors the usual changelog-writer flow: commits are grouped and sorted
//! into a `WriterContext<CommitRecord>`, notes are collected into note
//! groups, and then the finalizer takes over the commit groups.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{CommitGroup, CommitRecord, NoteGroup, ReleaseMeta, WriterContext};

use super::templates::Templates;

/// Commit fields usable for grouping and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitField {
    Type,
    Scope,
    Subject,
    Header,
    Hash,
}

impl CommitField {
    #[must_use]
    pub fn value<'c>(&self, commit: &'c CommitRecord) -> Option<&'c str> {
        match self {
            Self::Type => commit.commit_type.as_deref(),
            Self::Scope => commit.scope.as_deref(),
            Self::Subject => commit.subject.as_deref(),
            Self::Header => Some(commit.header.as_str()),
            Self::Hash => commit.hash.as_deref(),
        }
    }
}

/// Group ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupSort {
    Title,
}

/// Note ordering inside a note group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteSort {
    Text,
}

/// How release notes are grouped, sorted and rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterOptions {
    pub group_by: CommitField,
    pub commit_groups_sort: Option<GroupSort>,
    pub commits_sort: Vec<CommitField>,
    pub note_groups_sort: Option<GroupSort>,
    pub notes_sort: Option<NoteSort>,
    #[serde(flatten)]
    pub templates: Templates,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self::with_templates(Templates::builtin())
    }
}

impl WriterOptions {
    /// The preset's writer settings with the given templates.
    #[must_use]
    pub fn with_templates(templates: Templates) -> Self {
        Self {
            group_by: CommitField::Type,
            commit_groups_sort: Some(GroupSort::Title),
            commits_sort: vec![CommitField::Scope, CommitField::Subject],
            note_groups_sort: Some(GroupSort::Title),
            notes_sort: Some(NoteSort::Text),
            templates,
        }
    }

    fn compare_commits(&self, a: &CommitRecord, b: &CommitRecord) -> Ordering {
        self.commits_sort
            .iter()
            .map(|field| field.value(a).cmp(&field.value(b)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Build the pre-finalize context from transformed commits.
#[must_use]
pub fn build_context(
    commits: Vec<CommitRecord>,
    options: &WriterOptions,
    meta: ReleaseMeta,
) -> WriterContext<CommitRecord> {
    let mut note_groups: Vec<NoteGroup> = Vec::new();
    for note in commits.iter().flat_map(|c| &c.notes) {
        match note_groups.iter_mut().find(|g| g.title == note.title) {
            Some(group) => group.notes.push(note.clone()),
            None => note_groups.push(NoteGroup {
                title: note.title.clone(),
                notes: vec![note.clone()],
            }),
        }
    }
    if options.note_groups_sort == Some(GroupSort::Title) {
        note_groups.sort_by(|a, b| a.title.cmp(&b.title));
    }
    if options.notes_sort == Some(NoteSort::Text) {
        for group in &mut note_groups {
            group.notes.sort_by(|a, b| a.text.cmp(&b.text));
        }
    }

    let mut commit_groups: Vec<CommitGroup<CommitRecord>> = Vec::new();
    for commit in commits {
        let title = options.group_by.value(&commit).unwrap_or_default().to_string();
        match commit_groups.iter_mut().find(|g| g.title == title) {
            Some(group) => group.commits.push(commit),
            None => commit_groups.push(CommitGroup {
                title,
                commits: vec![commit],
            }),
        }
    }
    if options.commit_groups_sort == Some(GroupSort::Title) {
        commit_groups.sort_by(|a, b| a.title.cmp(&b.title));
    }
    for group in &mut commit_groups {
        group.commits.sort_by(|a, b| options.compare_commits(a, b));
    }

    let mut context = WriterContext::new(meta);
    context.commit_groups = commit_groups;
    context.note_groups = note_groups;
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Note;

    fn commit(commit_type: &str, scope: Option<&str>, subject: &str) -> CommitRecord {
        CommitRecord {
            header: format!("{commit_type}: {subject}"),
            commit_type: Some(commit_type.to_string()),
            scope: scope.map(String::from),
            subject: Some(subject.to_string()),
            ..CommitRecord::default()
        }
    }

    #[test]
    fn test_commits_grouped_by_type_and_sorted() {
        let commits = vec![
            commit("fix", None, "zeta"),
            commit("feat", Some("ui"), "beta"),
            commit("feat", None, "gamma"),
            commit("feat", Some("api"), "alpha"),
        ];

        let ctx = build_context(commits, &WriterOptions::default(), ReleaseMeta::default());

        let titles: Vec<&str> = ctx.commit_groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["feat", "fix"]);
        let feat: Vec<&str> = ctx.commit_groups[0]
            .commits
            .iter()
            .map(|c| c.subject.as_deref().unwrap())
            .collect();
        // Missing scope sorts first, then by scope, then subject.
        assert_eq!(feat, ["gamma", "alpha", "beta"]);
    }

    #[test]
    fn test_note_groups_sorted_by_title_then_text() {
        let mut a = commit("feat", None, "a");
        a.notes = vec![Note { title: "BREAKING CHANGES".into(), text: "zz".into() }];
        let mut b = commit("fix", None, "b");
        b.notes = vec![
            Note { title: "BREAKING CHANGES".into(), text: "aa".into() },
            Note { title: "ANNOUNCEMENT".into(), text: "hi".into() },
        ];

        let ctx = build_context(vec![a, b], &WriterOptions::default(), ReleaseMeta::default());

        assert_eq!(ctx.note_groups[0].title, "ANNOUNCEMENT");
        let texts: Vec<&str> = ctx.note_groups[1].notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, ["aa", "zz"]);
    }

    #[test]
    fn test_options_serialize_like_a_preset() {
        let json = serde_json::to_value(WriterOptions::default()).unwrap();
        assert_eq!(json["groupBy"], "type");
        assert_eq!(json["commitGroupsSort"], "title");
        assert_eq!(json["commitsSort"], serde_json::json!(["scope", "subject"]));
        assert_eq!(json["noteGroupsSort"], "title");
        assert!(json["mainTemplate"].as_str().unwrap().contains("commitGroups"));
    }
}
