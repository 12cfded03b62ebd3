//! Generate command implementation.
//!
//! Reads commits (from git or a JSON file), enriches them with tracker
//! issues and renders the release notes. With `--json` the finalized
//! context is printed instead of the rendered markdown.

use crate::cli::GenerateArgs;
use crate::config::{TrackerConfig, TrackerSettings};
use crate::error::{Error, Result};
use crate::git;
use crate::model::{CommitRecord, ReleaseMeta};
use crate::preset::{Preset, Templates, WriterOptions};
use crate::tracker::{IssueCache, JiraClient};
use std::path::Path;
use tracing::info;

/// Execute the generate command.
pub fn execute(args: &GenerateArgs, tracker: &TrackerSettings, json: bool) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(execute_async(args, tracker, json))
}

async fn execute_async(args: &GenerateArgs, tracker: &TrackerSettings, json: bool) -> Result<()> {
    let templates = match &args.templates {
        Some(dir) => Templates::load(dir).await?,
        None => Templates::builtin(),
    };

    let config = TrackerConfig::resolve(tracker);
    let tracker_url = config.browse_url();
    let preset = Preset::new(JiraClient::new(config)).with_writer(WriterOptions::with_templates(templates));

    let commits = match &args.input {
        Some(path) => read_input(path)?,
        None => {
            let range = match &args.from {
                Some(from) => format!("{from}..{}", args.to),
                None => git::default_range(&args.repo, &args.to),
            };
            git::read_commits(&args.repo, &range, preset.parser())?
        }
    };
    info!(count = commits.len(), "Transforming commits");

    let meta = ReleaseMeta {
        version: args.release_version.clone(),
        title: args.title.clone(),
        date: args.date.clone(),
        tracker_url,
    };
    let mut cache = IssueCache::new();

    let output = if json {
        let context = preset.enrich(&mut cache, commits, meta).await;
        serde_json::to_string_pretty(&context)?
    } else {
        preset.generate(&mut cache, commits, meta).await?
    };

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &output).await?;
            info!(path = %path.display(), "Wrote release notes");
        }
        None => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}

/// Read pre-parsed commit records from a JSON array.
fn read_input(path: &Path) -> Result<Vec<CommitRecord>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        Error::InvalidArgument(format!("{} is not a JSON array of commits: {e}", path.display()))
    })
}
