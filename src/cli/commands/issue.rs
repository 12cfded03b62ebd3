//! Issue command: look up one ticket on the tracker.
//!
//! Unlike changelog generation, a failed lookup here is reported as an
//! error so credentials and host can be checked.

use crate::config::{TrackerConfig, TrackerSettings};
use crate::error::{Error, Result};
use crate::model::Issue;
use crate::preset::{ticket_key, ISSUE_PREFIX};
use crate::tracker::{IssueSource, JiraClient};
use colored::Colorize;

/// Normalize `COB-12`, `cob-12` or `12` to `COB-12`.
fn normalize_key(input: &str) -> Result<String> {
    let input = input.trim();
    let number = input
        .get(..ISSUE_PREFIX.len())
        .filter(|head| head.eq_ignore_ascii_case(ISSUE_PREFIX))
        .map_or(input, |_| &input[ISSUE_PREFIX.len()..]);

    ticket_key(ISSUE_PREFIX, number)
        .ok_or_else(|| Error::InvalidArgument(format!("'{input}' is not a {ISSUE_PREFIX}<number> key")))
}

/// Execute the issue command.
pub fn execute(key: &str, tracker: &TrackerSettings, json: bool) -> Result<()> {
    let key = normalize_key(key)?;
    let client = JiraClient::new(TrackerConfig::resolve(tracker));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;
    let issue = rt.block_on(client.fetch_issue(&key))?;

    if json {
        println!("{}", serde_json::to_string(&issue)?);
    } else {
        print_issue(&issue, client.config().browse_url().as_deref());
    }
    Ok(())
}

fn print_issue(issue: &Issue, browse_url: Option<&str>) {
    let priority = issue.priority.as_deref().unwrap_or("-");
    println!("{} {}", issue.key.bold(), issue.summary);
    println!("  {} {}", "Type:".cyan(), issue.issue_type);
    println!("  {} {priority}", "Priority:".cyan());
    if let Some(parent) = &issue.parent_key {
        println!("  {} {parent}", "Subtask of:".yellow());
    }
    if let Some(base) = browse_url {
        println!("  {} {base}{}", "Link:".cyan(), issue.key);
    }
}
