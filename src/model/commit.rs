//! Parsed commit records.
//!
//! Field names serialize in camelCase so records can be exchanged as JSON
//! with other changelog tooling (`--input`).

use serde::{Deserialize, Serialize};

/// A commit annotation such as `BREAKING CHANGE: ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// A ticket reference found in a commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Numeric-like ticket suffix, e.g. `"123"` for `COB-123`
    pub issue: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Reference {
    pub fn new(issue: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            prefix: None,
            raw: None,
        }
    }
}

/// The reverted header and hash of a revert commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revert {
    pub header: String,
    pub hash: String,
}

/// A commit after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(default)]
    pub header: String,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub commit_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    #[serde(default)]
    pub notes: Vec<Note>,

    #[serde(default)]
    pub references: Vec<Reference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revert: Option<Revert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let commit: CommitRecord = serde_json::from_str(
            r#"{"header": "feat: x", "references": [{"issue": "12"}]}"#,
        )
        .unwrap();

        assert!(commit.hash.is_none());
        assert!(commit.notes.is_empty());
        assert_eq!(commit.references, vec![Reference::new("12")]);
    }

    #[test]
    fn test_type_field_is_renamed() {
        let commit = CommitRecord {
            commit_type: Some("fix".into()),
            ..CommitRecord::default()
        };
        let json = serde_json::to_value(&commit).unwrap();
        assert_eq!(json["type"], "fix");
    }
}
