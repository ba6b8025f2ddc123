//! Configuration for a documentation run.
//!
//! Configuration is read from a TOML file (conventionally `docgen.toml`);
//! every key is optional.
//!
//! # Examples
//!
//! ```
//! use docgen_core::{DocgenConfig, ListPolicy};
//!
//! let config = DocgenConfig::from_toml_str(r#"
//!     interface = "StorageMiner"
//!     source = "api"
//!     list_examples = "empty"
//!
//!     [examples]
//!     SectorState = "Proving"
//! "#).unwrap();
//!
//! assert_eq!(config.interface, "StorageMiner");
//! assert_eq!(config.list_examples, ListPolicy::Empty);
//! assert_eq!(config.skip_params, 1);
//! ```

use crate::{Error, ListPolicy, MethodOrder, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Conventional configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "docgen.toml";

/// Settings for one documentation run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocgenConfig {
    /// Name of the trait to document.
    ///
    /// Default: `FullNode`
    pub interface: String,

    /// Source file or directory defining the trait and its types.
    ///
    /// Default: `api`
    pub source: PathBuf,

    /// Source file or directory to read doc comments from.
    ///
    /// Default: `None` (same as `source`)
    pub doc_source: Option<PathBuf>,

    /// Leading parameters left out of the example argument list.
    ///
    /// The receiver is never counted. Default: 1 (the context parameter)
    pub skip_params: usize,

    /// Contents of list examples.
    ///
    /// Default: populated
    pub list_examples: ListPolicy,

    /// Order of methods in the report.
    ///
    /// Default: alphabetical
    pub method_order: MethodOrder,

    /// Extra example literals keyed by type expression.
    ///
    /// Entries override the built-in examples for the same type.
    pub examples: BTreeMap<String, serde_json::Value>,

    /// Map examples built as `{key: <example of the value type>}`.
    pub map_examples: Vec<MapExample>,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            interface: "FullNode".to_string(),
            source: PathBuf::from("api"),
            doc_source: None,
            skip_params: 1,
            list_examples: ListPolicy::default(),
            method_order: MethodOrder::default(),
            examples: BTreeMap::new(),
            map_examples: Vec::new(),
        }
    }
}

impl DocgenConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the text is not valid TOML or
    /// contains unknown keys or values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::ConfigError {
            message: e.to_string(),
        })
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or
    /// [`Error::ConfigError`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

/// A keyed map example.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapExample {
    /// Map type expression, e.g. `HashMap<String, Actor>`
    #[serde(rename = "type")]
    pub map_type: String,
    /// Key of the single example entry
    pub key: String,
}

impl MapExample {
    /// Creates a map example.
    #[must_use]
    pub fn new(map_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            map_type: map_type.into(),
            key: key.into(),
        }
    }
}
