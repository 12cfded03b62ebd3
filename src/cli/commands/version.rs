//! Version command implementation.

use crate::config::ENV_URL;
use crate::error::Result;
use crate::preset::ISSUE_PREFIX;
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    issue_prefix: &'a str,
    tracker_configured: bool,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) { "dev" } else { "release" };
    let tracker_configured = std::env::var(ENV_URL).is_ok_and(|v| !v.is_empty());

    if json {
        let output = VersionOutput {
            version,
            build,
            issue_prefix: ISSUE_PREFIX,
            tracker_configured,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("cob-changelog {version} ({build}), tickets {ISSUE_PREFIX}<n>");
    if !tracker_configured {
        println!("{ENV_URL} is not set; issue enrichment needs a tracker host");
    }
    Ok(())
}
