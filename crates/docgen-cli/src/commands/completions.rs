//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, and `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use docgen_core::cli::ExitCode;
use std::io;
use tracing::info;

/// Writes the completion script for `shell` to `out`.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use clap_complete::Shell;
/// use docgen_cli::commands::completions;
///
/// let mut cmd = Command::new("api-docgen").subcommand(Command::new("generate"));
/// let mut out = Vec::new();
/// completions::generate_completions(Shell::Bash, &mut cmd, &mut out);
/// assert!(String::from_utf8(out).unwrap().contains("api-docgen"));
/// ```
pub fn generate_completions(shell: Shell, cmd: &mut Command, out: &mut dyn io::Write) {
    info!("Generating {shell} completions");
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
///
/// # Errors
///
/// This command does not fail; the `Result` keeps the signature uniform
/// with the other commands.
#[allow(clippy::unnecessary_wraps)]
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    generate_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::Success)
}
