//! Generate command implementation.
//!
//! Prints the API reference of one trait to stdout:
//! 1. Loads the configuration and applies the command-line overrides
//! 2. Parses the sources and extracts the method set
//! 3. Extracts doc comments (a failure here only loses the comments)
//! 4. Synthesizes examples and writes one section per method

use super::common::{Workspace, load_config};
use anyhow::{Context, Result};
use docgen_codegen::{ReportEmitter, Synthesizer};
use docgen_core::cli::ExitCode;
use docgen_core::{DocgenConfig, ListPolicy, MethodOrder};
use docgen_introspector::{CommentExtractor, MethodDocs, SourceTree};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Trait to document
    pub interface: Option<String>,
    /// Source file or directory
    pub source: Option<PathBuf>,
    /// Doc comment source
    pub doc_source: Option<PathBuf>,
    /// Leading parameters to skip
    pub skip_params: Option<usize>,
    /// List example policy
    pub list_examples: Option<ListPolicy>,
    /// Method order
    pub order: Option<MethodOrder>,
}

impl Overrides {
    /// Applies the overrides to a configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use docgen_cli::commands::generate::Overrides;
    /// use docgen_core::{DocgenConfig, MethodOrder};
    ///
    /// let overrides = Overrides {
    ///     interface: Some("Gateway".to_string()),
    ///     order: Some(MethodOrder::Declaration),
    ///     ..Overrides::default()
    /// };
    /// let config = overrides.apply(DocgenConfig::default());
    /// assert_eq!(config.interface, "Gateway");
    /// assert_eq!(config.method_order, MethodOrder::Declaration);
    /// assert_eq!(config.skip_params, 1);
    /// ```
    #[must_use]
    pub fn apply(&self, mut config: DocgenConfig) -> DocgenConfig {
        if let Some(interface) = &self.interface {
            config.interface.clone_from(interface);
        }
        if let Some(source) = &self.source {
            config.source.clone_from(source);
        }
        if let Some(doc_source) = &self.doc_source {
            config.doc_source = Some(doc_source.clone());
        }
        if let Some(skip_params) = self.skip_params {
            config.skip_params = skip_params;
        }
        if let Some(policy) = self.list_examples {
            config.list_examples = policy;
        }
        if let Some(order) = self.order {
            config.method_order = order;
        }
        config
    }
}

/// Runs the generate command, writing the report to stdout.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration cannot be loaded
/// - The sources cannot be read or parsed
/// - The trait is not found
/// - A method argument or return type has no example
pub fn run(config_path: Option<&Path>, overrides: &Overrides) -> Result<ExitCode> {
    let config = overrides.apply(load_config(config_path)?);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let methods = generate(&config, &mut out)?;
    out.flush().context("failed to flush stdout")?;

    info!(interface = %config.interface, methods, "documentation generated");
    Ok(ExitCode::Success)
}

/// Writes the report for `config` to `out` and returns the number of
/// documented methods.
///
/// # Errors
///
/// See [`run`].
pub fn generate<W: Write>(config: &DocgenConfig, out: &mut W) -> Result<usize> {
    let Workspace {
        introspector,
        mut registry,
    } = Workspace::load(config)?;

    let iface = introspector
        .interface(&config.interface)
        .with_context(|| format!("cannot document `{}`", config.interface))?;

    let docs = match &config.doc_source {
        Some(path) => match SourceTree::load(path) {
            Ok(tree) => CommentExtractor::extract_or_empty(&tree, &config.interface),
            Err(err) => {
                warn!(error = %err, "doc source unreadable, continuing without comments");
                MethodDocs::new()
            }
        },
        None => introspector.docs(&config.interface).unwrap_or_default(),
    };

    let mut synth = Synthesizer::new(&mut registry, introspector.catalog().structs())
        .with_list_policy(config.list_examples);
    let emitter = ReportEmitter::new()?
        .with_skip_params(config.skip_params)
        .with_order(config.method_order);

    Ok(emitter.run(&iface, &docs, &mut synth, out)?)
}
