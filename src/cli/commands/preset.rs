//! Preset command: dump parser and writer options as JSON.

use crate::error::{Error, Result};
use crate::preset::{ParserOptions, PresetOptions, Templates, WriterOptions};
use std::path::PathBuf;

/// Execute the preset command.
///
/// The output is always JSON; it is the configuration other tools consume.
pub fn execute(templates: Option<&PathBuf>) -> Result<()> {
    let templates = match templates {
        Some(dir) => {
            let rt = tokio::runtime::Runtime::new()
                .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;
            rt.block_on(Templates::load(dir))?
        }
        None => Templates::builtin(),
    };

    let parser_opts = ParserOptions::default();
    let writer_opts = WriterOptions::with_templates(templates);
    let options = PresetOptions {
        parser_opts: &parser_opts,
        writer_opts: &writer_opts,
    };

    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}
