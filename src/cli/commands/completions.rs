//! Shell completions for `cob-changelog`.

use crate::cli::{Cli, Shell};
use crate::error::Result;
use clap::CommandFactory;
use std::io::{self, Write};

impl From<&Shell> for clap_complete::Shell {
    fn from(shell: &Shell) -> Self {
        match shell {
            Shell::Bash => Self::Bash,
            Shell::Zsh => Self::Zsh,
            Shell::Fish => Self::Fish,
            Shell::PowerShell => Self::PowerShell,
            Shell::Elvish => Self::Elvish,
        }
    }
}

/// Write the completion script for `shell` to `out`.
///
/// The binary name comes from the clap definition, so the script completes
/// the global `--jira-*` flags for every subcommand.
pub fn write_completions(shell: &Shell, out: &mut impl Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(clap_complete::Shell::from(shell), &mut cmd, bin_name, out);
}

/// Print completions for the specified shell.
pub fn execute(shell: &Shell) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_completions(shell, &mut stdout);
    stdout.flush()?;
    Ok(())
}
