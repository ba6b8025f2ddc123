//! API documentation generator.
//!
//! Reads the Rust trait that defines an API and prints a markdown reference
//! with example arguments and responses for every method.
//!
//! # Examples
//!
//! ```bash
//! # Document the FullNode trait declared under ./api
//! api-docgen generate > documentation/en/api-methods.md
//!
//! # Inspect the example chosen for one type
//! api-docgen example 'Vec<BlockHeader>'
//! ```

use clap::Parser;
use docgen_cli::Cli;
use docgen_cli::runner::{execute_command, init_logging};
use docgen_core::cli::ExitCode;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let outcome = init_logging(cli.verbose).and_then(|()| execute_command(cli.command, cli.config));
    if let Err(err) = &outcome {
        eprintln!("Error: {err:#}");
    }

    outcome.unwrap_or(ExitCode::Failure).into()
}
