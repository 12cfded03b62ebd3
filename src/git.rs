//! Reading commits from git.
//!
//! Shells out to `git log` with unit/record separators so multi-line
//! messages survive intact.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::CommitRecord;
use crate::preset::CommitParser;

const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';

/// A commit as read from `git log`, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    pub hash: String,
    pub message: String,
}

fn git(repo: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .map_err(|e| Error::Git(format!("Failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Git(format!("git {} failed: {}", args.join(" "), stderr.trim())));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn describe_tag(repo: &Path, rev: &str) -> Option<String> {
    git(repo, &["describe", "--tags", "--abbrev=0", rev])
        .ok()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
}

fn commit_of(repo: &Path, rev: &str) -> Option<String> {
    git(repo, &["rev-parse", "--verify", "--quiet", &format!("{rev}^{{commit}}")])
        .ok()
        .map(|hash| hash.trim().to_string())
}

/// Most recent tag strictly before `to`.
///
/// A tag sitting on `to` itself marks the release being generated, so the
/// search continues from `to`'s first parent.
#[must_use]
pub fn latest_tag(repo: &Path, to: &str) -> Option<String> {
    let tag = describe_tag(repo, to)?;
    let on_end = commit_of(repo, &tag).is_some_and(|c| Some(c) == commit_of(repo, to));
    if on_end {
        describe_tag(repo, &format!("{to}^"))
    } else {
        Some(tag)
    }
}

/// Revision range used when the caller gives no start: `<previous tag>..<to>`,
/// or all of `to` when no earlier tag exists.
#[must_use]
pub fn default_range(repo: &Path, to: &str) -> String {
    match latest_tag(repo, to) {
        Some(tag) => format!("{tag}..{to}"),
        None => to.to_string(),
    }
}

/// Read raw commits for `range`, newest first.
pub fn read_raw_commits(repo: &Path, range: &str) -> Result<Vec<RawCommit>> {
    let format = format!("--format=%H{FIELD_SEP}%B{RECORD_SEP}");
    let output = git(repo, &["log", &format, range])?;
    let commits = split_log(&output);
    debug!(range, count = commits.len(), "Read commits from git");
    Ok(commits)
}

/// Read and parse commits for `range`.
pub fn read_commits(repo: &Path, range: &str, parser: &CommitParser) -> Result<Vec<CommitRecord>> {
    Ok(read_raw_commits(repo, range)?
        .into_iter()
        .map(|raw| {
            let mut commit = parser.parse(&raw.message);
            commit.hash = Some(raw.hash);
            commit
        })
        .collect())
}

/// Split `git log` output produced with the separator format.
#[must_use]
pub fn split_log(output: &str) -> Vec<RawCommit> {
    output
        .split(RECORD_SEP)
        .filter_map(|record| {
            let record = record.trim_start_matches(['\n', '\r']);
            let (hash, message) = record.split_once(FIELD_SEP)?;
            let hash = hash.trim();
            (!hash.is_empty()).then(|| RawCommit {
                hash: hash.to_string(),
                message: message.trim_end().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_multiline_messages() {
        let output = "aaa\u{1f}feat: one\n\nbody line\n\u{1e}\nbbb\u{1f}fix: two COB-3\n\u{1e}\n";

        let commits = split_log(output);

        assert_eq!(
            commits,
            vec![
                RawCommit { hash: "aaa".into(), message: "feat: one\n\nbody line".into() },
                RawCommit { hash: "bbb".into(), message: "fix: two COB-3".into() },
            ]
        );
    }

    #[test]
    fn test_split_log_empty_output() {
        assert!(split_log("").is_empty());
        assert!(split_log("\n").is_empty());
    }

    fn run_git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(["-c", "user.name=Release Bot", "-c", "user.email=bot@example.com"])
            .args(["-c", "commit.gpgsign=false", "-c", "tag.gpgsign=false"])
            .args(args)
            .output()
            .unwrap()
            .status;
        assert!(status.success(), "git {args:?} failed");
    }

    fn commit_and_tag(dir: &Path, message: &str, tag: Option<&str>) {
        run_git(dir, &["commit", "--allow-empty", "-q", "-m", message]);
        if let Some(tag) = tag {
            run_git(dir, &["tag", tag]);
        }
    }

    /// v1.0.0, v1.1.0 and v1.2.0 on consecutive commits.
    fn tagged_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init", "-q"]);
        commit_and_tag(dir.path(), "chore: init", Some("v1.0.0"));
        commit_and_tag(dir.path(), "fix: one COB-1", Some("v1.1.0"));
        commit_and_tag(dir.path(), "feat: two COB-2", Some("v1.2.0"));
        dir
    }

    #[test]
    fn test_range_to_older_tag_starts_at_previous_tag() {
        let repo = tagged_repo();

        let range = default_range(repo.path(), "v1.1.0");
        assert_eq!(range, "v1.0.0..v1.1.0");

        let commits = read_commits(repo.path(), &range, &CommitParser::default()).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].header, "fix: one COB-1");
    }

    #[test]
    fn test_tagged_head_uses_previous_tag() {
        let repo = tagged_repo();

        assert_eq!(latest_tag(repo.path(), "HEAD").as_deref(), Some("v1.1.0"));
        assert_eq!(default_range(repo.path(), "HEAD"), "v1.1.0..HEAD");
    }

    #[test]
    fn test_untagged_head_uses_latest_tag() {
        let repo = tagged_repo();
        commit_and_tag(repo.path(), "fix: three COB-3", None);

        let range = default_range(repo.path(), "HEAD");
        assert_eq!(range, "v1.2.0..HEAD");
        let commits = read_raw_commits(repo.path(), &range).unwrap();
        assert_eq!(commits.len(), 1);
    }

    #[test]
    fn test_first_tag_covers_whole_history() {
        let repo = tagged_repo();

        assert_eq!(latest_tag(repo.path(), "v1.0.0"), None);
        assert_eq!(default_range(repo.path(), "v1.0.0"), "v1.0.0");
    }

    #[test]
    fn test_no_tags_covers_whole_history() {
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init", "-q"]);
        commit_and_tag(dir.path(), "chore: init", None);

        assert_eq!(default_range(dir.path(), "HEAD"), "HEAD");
    }

    #[test]
    fn test_git_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_raw_commits(dir.path(), "HEAD").unwrap_err();
        assert!(matches!(err, Error::Git(_)));
    }
}
