//! Configuration management.
//!
//! Tracker credentials come from three layers, highest priority first:
//! 1. Explicit values (CLI flags)
//! 2. Environment: `JIRA_USERNAME`, `JIRA_PASSWORD`, `JIRA_URL`
//! 3. The `tracker` section of `~/.cob-changelog/config.json`
//!
//! Nothing is validated here. A missing value is logged and left empty;
//! the resulting request URL is unusable and every issue lookup fails
//! softly, so the changelog still renders without enrichment.

use crate::error::{Error, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ENV_USERNAME: &str = "JIRA_USERNAME";
pub const ENV_PASSWORD: &str = "JIRA_PASSWORD";
pub const ENV_URL: &str = "JIRA_URL";

/// REST path for single-issue lookups, relative to the tracker host.
const ISSUE_API_PATH: &str = "rest/api/latest/issue/";

/// Tracker settings as stored in the config file or passed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSettings {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Host, optionally with scheme (`jira.example.com`, `http://localhost:8080`)
    pub url: Option<String>,
}

/// Local configuration file structure.
///
/// Stored at `~/.cob-changelog/config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangelogConfig {
    pub tracker: Option<TrackerSettings>,
}

/// Get the global configuration directory.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".cob-changelog"))
}

/// Get the config file path.
fn config_path() -> Result<PathBuf> {
    global_config_dir()
        .map(|dir| dir.join("config.json"))
        .ok_or(Error::Config("Could not determine home directory".into()))
}

/// Load the global configuration, or defaults when the file does not exist.
pub fn load_config() -> Result<ChangelogConfig> {
    load_config_from(&config_path()?)
}

/// Load configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<ChangelogConfig> {
    if !path.exists() {
        return Ok(ChangelogConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file: {e}")))
}

/// Resolved tracker connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub username: String,
    pub password: String,
    pub host: String,
}

// Keep the password out of logs and panics.
impl std::fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("host", &self.host)
            .finish()
    }
}

impl TrackerConfig {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            host: host.into(),
        }
    }

    /// Resolve from explicit values, the process environment and the config file.
    #[must_use]
    pub fn resolve(explicit: &TrackerSettings) -> Self {
        let file = match load_config() {
            Ok(config) => config.tracker.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable config file");
                TrackerSettings::default()
            }
        };
        Self::resolve_with(explicit, |name| std::env::var(name).ok(), &file)
    }

    /// Resolve with an injectable environment lookup.
    pub fn resolve_with(
        explicit: &TrackerSettings,
        env: impl Fn(&str) -> Option<String>,
        file: &TrackerSettings,
    ) -> Self {
        let pick = |flag: &Option<String>, var: &str, stored: &Option<String>| {
            let value = flag
                .clone()
                .filter(|v| !v.is_empty())
                .or_else(|| env(var).filter(|v| !v.is_empty()))
                .or_else(|| stored.clone());
            value.unwrap_or_else(|| {
                warn!("{var} is not set; issue lookups will fail");
                String::new()
            })
        };

        let config = Self {
            username: pick(&explicit.username, ENV_USERNAME, &file.username),
            password: pick(&explicit.password, ENV_PASSWORD, &file.password),
            host: pick(&explicit.url, ENV_URL, &file.url),
        };
        debug!(?config, "Resolved tracker config");
        config
    }

    /// Tracker root URL. `https` is assumed when the host has no scheme.
    pub fn base_url(&self) -> Result<Url> {
        let host = self.host.trim().trim_end_matches('/');
        let raw = if host.contains("://") {
            format!("{host}/")
        } else {
            format!("https://{host}/")
        };
        let url = Url::parse(&raw)
            .map_err(|e| Error::Config(format!("Invalid tracker URL '{}': {e}", self.host)))?;
        if url.host_str().is_none_or(str::is_empty) {
            return Err(Error::Config(format!("Tracker URL '{}' has no host", self.host)));
        }
        Ok(url)
    }

    /// REST endpoint for one issue. Credentials are sent as basic auth.
    pub fn issue_url(&self, key: &str) -> Result<Url> {
        self.base_url()?
            .join(ISSUE_API_PATH)
            .and_then(|api| api.join(key))
            .map_err(|e| Error::Config(format!("Invalid issue URL for {key}: {e}")))
    }

    /// Human-facing browse base, e.g. `https://jira.example.com/browse/`.
    #[must_use]
    pub fn browse_url(&self) -> Option<String> {
        self.base_url()
            .ok()
            .and_then(|base| base.join("browse/").ok())
            .map(String::from)
    }
}
