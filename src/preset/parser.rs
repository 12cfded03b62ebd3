//! Commit message parsing.
//!
//! `ParserOptions` describes the preset's commit conventions as plain data
//! (it is what the `preset` command prints). `CommitParser` compiles those
//! options once and turns raw messages into [`CommitRecord`]s.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{CommitRecord, Note, Reference, Revert};

/// Ticket prefix used by every reference in this project.
pub const ISSUE_PREFIX: &str = "COB-";

/// Commit conventions of the preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserOptions {
    pub header_pattern: String,
    pub header_correspondence: Vec<String>,
    pub issue_prefixes: Vec<String>,
    pub reference_actions: Option<Vec<String>>,
    pub note_keywords: Vec<String>,
    pub revert_pattern: String,
    pub revert_correspondence: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            header_pattern: r"^(\w*): (.*)$".to_string(),
            header_correspondence: vec!["type".to_string(), "subject".to_string()],
            issue_prefixes: vec![ISSUE_PREFIX.to_string()],
            reference_actions: None,
            note_keywords: vec!["BREAKING CHANGE".to_string(), "BREAKING CHANGES".to_string()],
            revert_pattern: r"^revert:\s([\s\S]*?)\s*This reverts commit (\w*)\.".to_string(),
            revert_correspondence: vec!["header".to_string(), "hash".to_string()],
        }
    }
}

/// Compiled form of [`ParserOptions`].
#[derive(Debug, Clone)]
pub struct CommitParser {
    options: ParserOptions,
    header: Regex,
    revert: Regex,
    references: Option<Regex>,
}

impl Default for CommitParser {
    fn default() -> Self {
        Self::new(ParserOptions::default()).expect("built-in parser patterns are valid")
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidArgument(format!("Invalid {name}: {e}")))
}

impl CommitParser {
    pub fn new(options: ParserOptions) -> Result<Self> {
        let header = compile("header pattern", &options.header_pattern)?;
        let revert = compile("revert pattern", &options.revert_pattern)?;

        let references = if options.issue_prefixes.is_empty() {
            None
        } else {
            let alternatives = options
                .issue_prefixes
                .iter()
                .map(|p| regex::escape(p))
                .collect::<Vec<_>>()
                .join("|");
            Some(compile(
                "issue prefixes",
                &format!(r"(?i)(?:^|[^A-Za-z0-9_])(?P<prefix>{alternatives})(?P<issue>\d+)"),
            )?)
        };

        Ok(Self {
            options,
            header,
            revert,
            references,
        })
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse one raw commit message. The hash is left for the caller to set.
    #[must_use]
    pub fn parse(&self, message: &str) -> CommitRecord {
        let message = message.trim_matches('\n');
        let mut lines = message.lines();
        let header = lines.next().unwrap_or_default().trim_end().to_string();
        let rest: Vec<&str> = lines.collect();

        let mut commit = CommitRecord {
            header: header.clone(),
            ..CommitRecord::default()
        };

        if let Some(caps) = self.header.captures(&header) {
            for (i, field) in self.options.header_correspondence.iter().enumerate() {
                let value = caps
                    .get(i + 1)
                    .map(|m| m.as_str().to_string())
                    .filter(|v| !v.is_empty());
                match field.as_str() {
                    "type" => commit.commit_type = value,
                    "scope" => commit.scope = value,
                    "subject" => commit.subject = value,
                    _ => {}
                }
            }
        }

        let first_note = rest.iter().position(|line| self.note_start(line).is_some());
        let (body, footer) = rest.split_at(first_note.unwrap_or(rest.len()));
        commit.body = join_trimmed(body);
        commit.footer = join_trimmed(footer);
        commit.notes = self.notes(footer);
        commit.references = self.references(message);
        commit.revert = self.revert(message);

        commit
    }

    /// Keyword and remaining text if `line` opens a note.
    fn note_start<'l>(&self, line: &'l str) -> Option<(&str, &'l str)> {
        self.options.note_keywords.iter().find_map(|keyword| {
            line.strip_prefix(keyword.as_str())
                .and_then(|rest| rest.strip_prefix(':'))
                .map(|text| (keyword.as_str(), text.trim()))
        })
    }

    fn notes(&self, footer: &[&str]) -> Vec<Note> {
        let mut notes: Vec<Note> = Vec::new();
        let mut open = false;

        for line in footer {
            if let Some((title, text)) = self.note_start(line) {
                notes.push(Note {
                    title: title.to_string(),
                    text: text.to_string(),
                });
                open = true;
            } else if line.trim().is_empty() {
                open = false;
            } else if open {
                if let Some(note) = notes.last_mut() {
                    if !note.text.is_empty() {
                        note.text.push('\n');
                    }
                    note.text.push_str(line.trim());
                }
            }
        }

        notes
    }

    fn references(&self, message: &str) -> Vec<Reference> {
        let Some(pattern) = &self.references else {
            return Vec::new();
        };

        pattern
            .captures_iter(message)
            .map(|caps| {
                let prefix = caps["prefix"].to_string();
                let issue = caps["issue"].to_string();
                Reference {
                    raw: Some(format!("{prefix}{issue}")),
                    prefix: Some(prefix),
                    issue,
                }
            })
            .collect()
    }

    fn revert(&self, message: &str) -> Option<Revert> {
        let caps = self.revert.captures(message)?;
        let mut header = String::new();
        let mut hash = String::new();

        for (i, field) in self.options.revert_correspondence.iter().enumerate() {
            let value = caps.get(i + 1).map_or("", |m| m.as_str());
            match field.as_str() {
                "header" => header = value.to_string(),
                "hash" => hash = value.to_string(),
                _ => {}
            }
        }

        Some(Revert { header, hash })
    }
}

fn join_trimmed(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> CommitParser {
        CommitParser::new(ParserOptions::default()).unwrap()
    }

    #[test]
    fn test_header_splits_type_and_subject() {
        let commit = parser().parse("feat: add export button");

        assert_eq!(commit.header, "feat: add export button");
        assert_eq!(commit.commit_type.as_deref(), Some("feat"));
        assert_eq!(commit.subject.as_deref(), Some("add export button"));
        assert!(commit.scope.is_none());
        assert!(commit.body.is_none());
    }

    #[test]
    fn test_unconventional_header_leaves_fields_empty() {
        let commit = parser().parse("Merge branch 'develop'");
        assert!(commit.commit_type.is_none());
        assert!(commit.subject.is_none());
    }

    #[test]
    fn test_references_anywhere_in_message() {
        let commit = parser().parse("fix: null check\n\nRelated to cob-12 and COB-0034,COB-5");
        let issues: Vec<&str> = commit.references.iter().map(|r| r.issue.as_str()).collect();

        assert_eq!(issues, ["12", "0034", "5"]);
        assert_eq!(commit.references[0].raw.as_deref(), Some("cob-12"));
    }

    #[test]
    fn test_prefix_must_not_be_part_of_a_word() {
        let commit = parser().parse("chore: bump XCOB-1 tooling");
        assert!(commit.references.is_empty());
    }

    #[test]
    fn test_breaking_change_notes() {
        let message = "feat: new auth flow\n\nRewrites login.\n\nBREAKING CHANGE: tokens expire\nafter one hour\n\nBREAKING CHANGES: drop v1 API\nCOB-7";
        let commit = parser().parse(message);

        assert_eq!(commit.body.as_deref(), Some("Rewrites login."));
        assert_eq!(commit.notes.len(), 2);
        assert_eq!(commit.notes[0].title, "BREAKING CHANGE");
        assert_eq!(commit.notes[0].text, "tokens expire\nafter one hour");
        assert_eq!(commit.notes[1].title, "BREAKING CHANGES");
        assert_eq!(commit.notes[1].text, "drop v1 API\nCOB-7");
        assert!(commit.footer.unwrap().starts_with("BREAKING CHANGE:"));
    }

    #[test]
    fn test_revert_commit() {
        let message = "revert: feat: add export button\n\nThis reverts commit 4f2a9c1e.";
        let commit = parser().parse(message);
        let revert = commit.revert.unwrap();

        assert_eq!(revert.header, "feat: add export button");
        assert_eq!(revert.hash, "4f2a9c1e");
        assert_eq!(commit.commit_type.as_deref(), Some("revert"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let options = ParserOptions {
            header_pattern: "(".to_string(),
            ..ParserOptions::default()
        };
        assert!(matches!(CommitParser::new(options), Err(Error::InvalidArgument(_))));
    }
}
