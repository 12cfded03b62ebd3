//! Jira REST issue source.
//!
//! Looks up issues with `GET /rest/api/latest/issue/<KEY>` using basic auth.

use crate::config::TrackerConfig;
use crate::error::{Error, Result};
use crate::model::Issue;
use serde::Deserialize;

use super::source::IssueSource;

/// Jira issue source.
pub struct JiraClient {
    client: reqwest::Client,
    config: TrackerConfig,
}

impl JiraClient {
    /// Create a client for the given tracker settings.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

/// Jira API response for a single issue (only the fields we read).
#[derive(Debug, Deserialize)]
struct JiraIssue {
    key: String,
    fields: JiraFields,
}

#[derive(Debug, Deserialize)]
struct JiraFields {
    issuetype: JiraIssueType,
    #[serde(default)]
    summary: String,
    priority: Option<JiraPriority>,
    parent: Option<JiraParent>,
}

#[derive(Debug, Deserialize)]
struct JiraIssueType {
    name: String,
    #[serde(default)]
    subtask: bool,
}

#[derive(Debug, Deserialize)]
struct JiraPriority {
    id: String,
}

#[derive(Debug, Deserialize)]
struct JiraParent {
    key: String,
}

impl JiraIssue {
    fn into_issue(self) -> Issue {
        let fields = self.fields;
        let mut issue = Issue::new(self.key, fields.issuetype.name, fields.summary);
        issue.subtask = fields.issuetype.subtask;
        if let Some(priority) = fields.priority {
            issue = issue.with_priority_id(&priority.id);
        }
        issue.parent_key = fields.parent.map(|p| p.key);
        issue
    }
}

impl IssueSource for JiraClient {
    fn name(&self) -> &str {
        "jira"
    }

    async fn fetch_issue(&self, key: &str) -> Result<Issue> {
        let url = self.config.issue_url(key)?;

        let response = self
            .client
            .get(url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Tracker {
                key: key.to_string(),
                status: Some(status.as_u16()),
                message: format!("Jira returned {status}: {}", body.trim()),
            });
        }

        let details: JiraIssue = response.json().await.map_err(|e| Error::Tracker {
            key: key.to_string(),
            status: Some(status.as_u16()),
            message: format!("Failed to parse Jira response: {e}"),
        })?;

        Ok(details.into_issue())
    }
}
