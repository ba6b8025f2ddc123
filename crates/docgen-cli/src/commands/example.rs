//! Example command implementation.
//!
//! Prints the synthesized example of a single type as pretty JSON, which
//! helps when tuning configured examples.

use super::common::{Workspace, load_config};
use anyhow::{Context, Result};
use docgen_codegen::Synthesizer;
use docgen_core::ListPolicy;
use docgen_core::cli::ExitCode;
use std::path::{Path, PathBuf};

/// Runs the example command, writing the JSON to stdout.
///
/// # Errors
///
/// Returns an error if the sources cannot be loaded, the type expression
/// does not parse, or the type has no example.
pub fn run(
    config_path: Option<&Path>,
    type_expr: &str,
    source: Option<PathBuf>,
    list_examples: Option<ListPolicy>,
) -> Result<ExitCode> {
    let mut config = load_config(config_path)?;
    if let Some(source) = source {
        config.source = source;
    }
    if let Some(policy) = list_examples {
        config.list_examples = policy;
    }

    println!("{}", example_json(&Workspace::load(&config)?, type_expr, config.list_examples)?);
    Ok(ExitCode::Success)
}

/// Synthesizes the example of a type expression and encodes it as pretty
/// JSON.
///
/// # Errors
///
/// Returns an error if the expression does not parse or the type has no
/// example.
pub fn example_json(workspace: &Workspace, type_expr: &str, policy: ListPolicy) -> Result<String> {
    let catalog = workspace.introspector.catalog();
    let ty = catalog
        .resolve_str(type_expr)
        .with_context(|| format!("invalid type expression `{type_expr}`"))?;

    let mut registry = workspace.registry.clone();
    let example = Synthesizer::new(&mut registry, catalog.structs())
        .with_list_policy(policy)
        .synthesize(&ty)?;
    Ok(serde_json::to_string_pretty(&example)?)
}
