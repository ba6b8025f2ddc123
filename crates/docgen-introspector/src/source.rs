//! Loading and parsing of interface source files.
//!
//! A [`SourceTree`] is either a single `.rs` file or every `.rs` file below a
//! directory, read in file-name order so repeated runs see the same items in
//! the same order.
//!
//! # Examples
//!
//! ```
//! use docgen_introspector::SourceTree;
//!
//! let tree = SourceTree::from_source("api.rs", "pub trait FullNode {}");
//! let parsed = tree.parse().unwrap();
//! assert_eq!(parsed.len(), 1);
//! ```

use docgen_core::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Raw text of one source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path the text was read from
    pub path: PathBuf,
    /// File contents
    pub text: String,
}

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// Path the text was read from
    pub path: PathBuf,
    /// Syntax tree
    pub ast: syn::File,
}

/// The set of source files defining an interface and its types.
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    files: Vec<SourceFile>,
}

impl SourceTree {
    /// Loads a single file, or every `.rs` file below a directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the path or one of the files cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut tree = Self::default();
        if metadata.is_file() {
            tree.read_file(path)?;
        } else {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(|e| walk_error(path, e))?;
                let is_rust = entry.path().extension().is_some_and(|ext| ext == "rs");
                if entry.file_type().is_file() && is_rust {
                    tree.read_file(entry.path())?;
                }
            }
        }

        tracing::debug!(
            path = %path.display(),
            files = tree.files.len(),
            "loaded source tree"
        );
        Ok(tree)
    }

    /// Creates a tree from in-memory text.
    #[must_use]
    pub fn from_source(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let mut tree = Self::default();
        tree.push(path, text);
        tree
    }

    /// Adds an in-memory file.
    pub fn push(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.push(SourceFile {
            path: path.into(),
            text: text.into(),
        });
    }

    /// Files in load order.
    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Returns `true` if the tree holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Parses every file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] for the first file that is not valid
    /// Rust.
    pub fn parse(&self) -> Result<Vec<ParsedFile>> {
        self.files
            .iter()
            .map(|file| {
                let ast = syn::parse_file(&file.text).map_err(|e| {
                    let start = e.span().start();
                    Error::ParseError {
                        path: file.path.clone(),
                        message: format!("{e} at line {}, column {}", start.line, start.column),
                    }
                })?;
                Ok(ParsedFile {
                    path: file.path.clone(),
                    ast,
                })
            })
            .collect()
    }

    fn read_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.push(path, text);
        Ok(())
    }
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    Error::Io { path, source }
}
