//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::TrackerSettings;

pub mod commands;

/// Changelog generator with Jira issue enrichment
#[derive(Parser, Debug)]
#[command(name = "cob-changelog", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub tracker: TrackerArgs,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Tracker connection overrides (fall back to JIRA_* env vars and the config file).
#[derive(Args, Debug, Default, Clone)]
pub struct TrackerArgs {
    /// Jira username
    #[arg(long, global = true)]
    pub jira_username: Option<String>,

    /// Jira password or API token
    #[arg(long, global = true)]
    pub jira_password: Option<String>,

    /// Jira host (https assumed when no scheme is given)
    #[arg(long, global = true)]
    pub jira_url: Option<String>,
}

impl TrackerArgs {
    #[must_use]
    pub fn settings(&self) -> TrackerSettings {
        TrackerSettings {
            username: self.jira_username.clone(),
            password: self.jira_password.clone(),
            url: self.jira_url.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate release notes for a range of commits
    Generate(GenerateArgs),

    /// Print the preset's parser and writer options
    Preset {
        /// Directory with template.md.j2, header.md.j2, commit.md.j2, footer.md.j2
        #[arg(long)]
        templates: Option<PathBuf>,
    },

    /// Look up a single issue on the tracker
    Issue {
        /// Issue key (COB-123) or bare number (123)
        key: String,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Start of the range (exclusive); defaults to the latest tag
    #[arg(long)]
    pub from: Option<String>,

    /// End of the range
    #[arg(long, default_value = "HEAD")]
    pub to: String,

    /// Repository path
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Read parsed commit records from a JSON file instead of git
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub input: Option<PathBuf>,

    /// Directory with template.md.j2, header.md.j2, commit.md.j2, footer.md.j2
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Release version shown in the header
    #[arg(long = "release-version")]
    pub release_version: Option<String>,

    /// Release title shown in the header
    #[arg(long)]
    pub title: Option<String>,

    /// Release date (default: today, UTC)
    #[arg(long)]
    pub date: Option<String>,

    /// Write the release notes to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
