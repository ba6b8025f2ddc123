//! Interface introspection over Rust sources.
//!
//! Parses the source files that declare an API trait and recovers what the
//! documentation generator needs from them: the method set of the trait, the
//! shapes of the types its methods mention, and the doc comment of each
//! method.
//!
//! # Examples
//!
//! ```
//! use docgen_core::TypeDesc;
//! use docgen_introspector::{DocSource, Introspector, SourceTree};
//!
//! let tree = SourceTree::from_source(
//!     "api.rs",
//!     "pub trait FullNode {
//!          /// GetHeight returns current height
//!          fn get_height(&self, ctx: Context) -> i64;
//!      }",
//! );
//! let introspector = Introspector::from_tree(&tree).unwrap();
//! let iface = introspector.interface("FullNode").unwrap();
//! assert_eq!(iface.methods[0].returns, TypeDesc::named("i64"));
//!
//! let docs = introspector.docs("FullNode").unwrap();
//! assert_eq!(docs.lookup("get_height"), Some("GetHeight returns current height"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod catalog;
pub mod docs;
pub mod interface;
mod source;

pub use catalog::TypeCatalog;
pub use docs::{CommentExtractor, DocSource, MethodDocs, NO_COMMENTS};
pub use interface::extract_interface;
pub use source::{ParsedFile, SourceFile, SourceTree};

use docgen_core::{InterfaceDesc, Result};

/// A parsed source tree together with its type catalog.
#[derive(Debug, Clone)]
pub struct Introspector {
    tree: SourceTree,
    files: Vec<ParsedFile>,
    catalog: TypeCatalog,
}

impl Introspector {
    /// Parses a source tree and builds its type catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a file does not parse or a struct field type
    /// cannot be described.
    pub fn from_tree(tree: &SourceTree) -> Result<Self> {
        let files = tree.parse()?;
        let catalog = TypeCatalog::from_files(&files)?;
        Ok(Self {
            tree: tree.clone(),
            files,
            catalog,
        })
    }

    /// The type catalog of the tree.
    #[must_use]
    pub const fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Extracts the method set of the named trait.
    ///
    /// # Errors
    ///
    /// See [`extract_interface`].
    pub fn interface(&self, name: &str) -> Result<InterfaceDesc> {
        extract_interface(&self.catalog, &self.files, name)
    }

    /// Extracts method documentation from the same tree.
    ///
    /// # Errors
    ///
    /// See [`CommentExtractor::extract`].
    pub fn docs(&self, interface: &str) -> Result<MethodDocs> {
        CommentExtractor::extract(&self.tree, interface)
    }
}
