//! Logging setup and command dispatch.

use anyhow::{Result, anyhow};
use docgen_core::cli::ExitCode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands;

/// Filter used when neither `--verbose` nor `RUST_LOG` says otherwise.
const DEFAULT_FILTER: &str = "info";

/// Installs the global log subscriber.
///
/// Logs go to stderr so that stdout carries only the report. `--verbose`
/// forces the `debug` level; otherwise `RUST_LOG` applies.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init()
        .map_err(|e| anyhow!("cannot install log subscriber: {e}"))
}

/// Runs one subcommand. `config` is the `--config` path, if any.
///
/// # Errors
///
/// Returns the error of the command.
pub fn execute_command(command: Commands, config: Option<PathBuf>) -> Result<ExitCode> {
    match command {
        Commands::Generate {
            interface,
            source,
            doc_source,
            skip_params,
            list_examples,
            order,
        } => commands::generate::run(
            config.as_deref(),
            &commands::generate::Overrides {
                interface,
                source,
                doc_source,
                skip_params,
                list_examples,
                order,
            },
        ),
        Commands::Example {
            type_expr,
            source,
            list_examples,
        } => commands::example::run(config.as_deref(), &type_expr, source, list_examples),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut <Cli as clap::CommandFactory>::command())
        }
    }
}
