//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use docgen_core::{ListPolicy, MethodOrder};
use std::path::PathBuf;

/// API documentation generator.
///
/// Reads the Rust trait that defines an API, and prints a markdown reference
/// with the doc comment, example arguments and example response of every
/// method.
#[derive(Parser, Debug)]
#[command(name = "api-docgen")]
#[command(version, about, long_about = None)]
#[command(author = "API Docgen Team")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ./docgen.toml when present)
    #[arg(short, long, global = true, env = "DOCGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the API reference to stdout.
    ///
    /// Flags override the values of the configuration file.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Document FullNode from ./api
    /// api-docgen generate > documentation/api.md
    ///
    /// # Another trait, comments from a single file
    /// api-docgen generate --interface StorageMiner --source node/api \
    ///     --doc-source node/api/storage.rs
    /// ```
    Generate {
        /// Trait to document
        #[arg(short, long)]
        interface: Option<String>,

        /// Source file or directory defining the trait and its types
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Source file or directory to read doc comments from
        #[arg(long)]
        doc_source: Option<PathBuf>,

        /// Leading parameters left out of the example arguments
        #[arg(long)]
        skip_params: Option<usize>,

        /// List examples: populated or empty
        #[arg(long)]
        list_examples: Option<ListPolicy>,

        /// Method order: alphabetical or declaration
        #[arg(long)]
        order: Option<MethodOrder>,
    },

    /// Print the example value of one type as pretty JSON.
    ///
    /// # Examples
    ///
    /// ```bash
    /// api-docgen example 'Option<BlockHeader>' --source api
    /// ```
    Example {
        /// Type expression, e.g. `Vec<Cid>` or `HashMap<String, Actor>`
        type_expr: String,

        /// Source file or directory defining the types
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// List examples: populated or empty
        #[arg(long)]
        list_examples: Option<ListPolicy>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
