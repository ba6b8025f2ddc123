//! Common utilities shared across CLI commands.
//!
//! Provides configuration discovery and the loading of the source tree,
//! type catalog and example registry that both `generate` and `example`
//! work from.

use anyhow::{Context, Result};
use docgen_codegen::ExampleRegistry;
use docgen_core::{DEFAULT_CONFIG_FILE, DocgenConfig};
use docgen_introspector::{Introspector, SourceTree};
use std::path::Path;
use tracing::debug;

/// Loads the run configuration.
///
/// An explicit path must exist. Without one, `./docgen.toml` is used when
/// present and built-in defaults otherwise. Relative paths inside the file
/// are resolved against the working directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Examples
///
/// ```
/// use docgen_cli::commands::common::load_config;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("docgen.toml");
/// std::fs::write(&path, "interface = \"Gateway\"").unwrap();
///
/// let config = load_config(Some(&path)).unwrap();
/// assert_eq!(config.interface, "Gateway");
/// ```
pub fn load_config(path: Option<&Path>) -> Result<DocgenConfig> {
    if let Some(path) = path {
        return DocgenConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()));
    }

    let default = Path::new(DEFAULT_CONFIG_FILE);
    if default.is_file() {
        return DocgenConfig::load(default)
            .with_context(|| format!("failed to load configuration from {DEFAULT_CONFIG_FILE}"));
    }

    debug!("no configuration file, using defaults");
    Ok(DocgenConfig::default())
}

/// Parsed sources and the example registry built over them.
#[derive(Debug)]
pub struct Workspace {
    /// Parsed source tree with its type catalog
    pub introspector: Introspector,
    /// Built-in, configured and map examples
    pub registry: ExampleRegistry,
}

impl Workspace {
    /// Loads `config.source` and builds the example registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the sources cannot be read or parsed, or a
    /// configured example is invalid.
    pub fn load(config: &DocgenConfig) -> Result<Self> {
        let tree = SourceTree::load(&config.source)
            .with_context(|| format!("failed to read sources from {}", config.source.display()))?;
        let introspector = Introspector::from_tree(&tree)?;
        let registry = ExampleRegistry::for_config(introspector.catalog(), config)
            .context("failed to build example registry")?;

        debug!(
            source = %config.source.display(),
            structs = introspector.catalog().structs().len(),
            examples = registry.len(),
            "workspace loaded"
        );
        Ok(Self {
            introspector,
            registry,
        })
    }
}
