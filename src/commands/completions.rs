//! The `completions` subcommand.

use anyhow::Result;
use clap::CommandFactory as _;

use crate::cli::{Cli, CompletionsOpts};

/// Run the `completions` command: write a completion script for the
/// requested shell to stdout.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the command signature uniform.
pub fn run(opts: &CompletionsOpts) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(opts.shell, &mut cmd, "dotsetup", &mut std::io::stdout());
    Ok(())
}
