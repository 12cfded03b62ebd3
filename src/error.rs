//! Error types for the changelog preset.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=config, 3=tracker, 4=git, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers
//!
//! Issue lookups during changelog generation never surface these errors;
//! the fetcher logs and swallows them. They only reach the user from
//! commands that talk to the tracker directly (`issue`) or from the
//! surrounding plumbing (git, templates, files).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for changelog operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Config (exit 2)
    ConfigError,

    // Tracker (exit 3)
    TrackerError,
    HttpError,

    // Git (exit 4)
    GitError,

    // Templates (exit 5)
    TemplateError,
    TemplateNotFound,

    // Validation (exit 6)
    InvalidArgument,

    // I/O (exit 7)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::ConfigError => "CONFIG_ERROR",
            Self::TrackerError => "TRACKER_ERROR",
            Self::HttpError => "HTTP_ERROR",
            Self::GitError => "GIT_ERROR",
            Self::TemplateError => "TEMPLATE_ERROR",
            Self::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-7).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::ConfigError => 2,
            Self::TrackerError | Self::HttpError => 3,
            Self::GitError => 4,
            Self::TemplateError | Self::TemplateNotFound => 5,
            Self::InvalidArgument => 6,
            Self::IoError | Self::JsonError => 7,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur while building a changelog.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tracker error for {key}: {message}")]
    Tracker {
        key: String,
        status: Option<u16>,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Template not found: {}", path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Tracker { .. } => ErrorCode::TrackerError,
            Self::Http(_) => ErrorCode::HttpError,
            Self::Git(_) => ErrorCode::GitError,
            Self::Template(_) => ErrorCode::TemplateError,
            Self::TemplateNotFound { .. } => ErrorCode::TemplateNotFound,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// HTTP status attached to the error, if the tracker answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Tracker { status, .. } => *status,
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Config(_) => Some(
                "Set JIRA_USERNAME, JIRA_PASSWORD and JIRA_URL, or add a `tracker` \
                 section to ~/.cob-changelog/config.json"
                    .to_string(),
            ),

            Self::Tracker { status: Some(401 | 403), .. } => {
                Some("The tracker rejected the credentials. Check JIRA_USERNAME and JIRA_PASSWORD.".to_string())
            }
            Self::Tracker { key, status: Some(404), .. } => Some(format!(
                "No issue '{key}' on the tracker. Check the key and the JIRA_URL host."
            )),

            Self::Git(_) => Some(
                "Run inside a git repository, or pass pre-parsed commits with `--input`."
                    .to_string(),
            ),

            Self::TemplateNotFound { path } => Some(format!(
                "Expected template.md.j2, header.md.j2, commit.md.j2 and footer.md.j2 in {}",
                path.parent().map_or_else(|| path.display().to_string(), |p| p.display().to_string())
            )),

            Self::Tracker { .. }
            | Self::Http(_)
            | Self::Template(_)
            | Self::InvalidArgument(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(status) = self.status() {
            obj["error"]["status"] = serde_json::Value::from(status);
        }
        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
