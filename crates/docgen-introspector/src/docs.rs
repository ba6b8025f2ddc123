//! Doc comment extraction.
//!
//! Doc comments reach the parser as `#[doc = "..."]` attributes. Attributes
//! on consecutive source lines form one comment group; a blank line or any
//! other line between them starts a new group. When several groups are
//! attached to a method, the last one (the one closest to the signature) is
//! its documentation.
//!
//! # Examples
//!
//! ```
//! use docgen_introspector::{CommentExtractor, DocSource, NO_COMMENTS, SourceTree};
//!
//! let tree = SourceTree::from_source(
//!     "api.rs",
//!     "pub trait FullNode {
//!          /// GetHeight returns current height
//!          fn get_height(&self, ctx: Context) -> i64;
//!          fn get_tail(&self, ctx: Context) -> i64;
//!      }",
//! );
//! let docs = CommentExtractor::extract(&tree, "FullNode").unwrap();
//!
//! assert_eq!(docs.lookup("get_height"), Some("GetHeight returns current height"));
//! assert_eq!(docs.lookup("get_tail"), Some(NO_COMMENTS));
//! assert_eq!(docs.lookup("missing"), None);
//! ```

use crate::interface::find_trait;
use crate::source::SourceTree;
use docgen_core::Result;
use std::collections::HashMap;
use syn::spanned::Spanned;

/// Recorded for methods that have no doc comment.
pub const NO_COMMENTS: &str = "NO COMMENTS";

/// Source of method documentation.
pub trait DocSource {
    /// Documentation for a method, if the source knows the method.
    fn lookup(&self, method: &str) -> Option<&str>;

    /// Documentation for a method, or [`NO_COMMENTS`].
    fn comment_for(&self, method: &str) -> &str {
        self.lookup(method).unwrap_or(NO_COMMENTS)
    }
}

/// Method name to doc comment mapping for one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodDocs {
    docs: HashMap<String, String>,
}

impl MethodDocs {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the documentation of a method.
    pub fn insert(&mut self, method: impl Into<String>, text: impl Into<String>) {
        self.docs.insert(method.into(), text.into());
    }

    /// Number of recorded methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns `true` if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl DocSource for MethodDocs {
    fn lookup(&self, method: &str) -> Option<&str> {
        self.docs.get(method).map(String::as_str)
    }
}

/// Builds [`MethodDocs`] from the doc attributes of one trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentExtractor;

impl CommentExtractor {
    /// Extracts the documentation of every method declared directly in the
    /// named trait. Supertrait methods are not included.
    ///
    /// A trait that does not occur in the tree yields an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`docgen_core::Error::ParseError`] if a file of the tree is not valid Rust.
    pub fn extract(tree: &SourceTree, interface: &str) -> Result<MethodDocs> {
        let files = tree.parse()?;
        let mut docs = MethodDocs::new();

        let Some(item) = find_trait(&files, interface) else {
            tracing::warn!(interface, "interface not found in doc source");
            return Ok(docs);
        };

        for trait_item in &item.items {
            let syn::TraitItem::Fn(f) = trait_item else {
                continue;
            };
            let name = f.sig.ident.to_string();
            let text = last_comment_group(&f.attrs).unwrap_or_else(|| NO_COMMENTS.to_string());
            tracing::debug!(method = %name, "extracted doc comment");
            docs.insert(name, text);
        }
        Ok(docs)
    }

    /// Like [`CommentExtractor::extract`], but a tree that fails to parse
    /// degrades to an empty mapping.
    #[must_use]
    pub fn extract_or_empty(tree: &SourceTree, interface: &str) -> MethodDocs {
        match Self::extract(tree, interface) {
            Ok(docs) => docs,
            Err(err) => {
                tracing::warn!(error = %err, "doc comments unavailable, continuing without them");
                MethodDocs::new()
            }
        }
    }
}

/// One `#[doc]` attribute with the source lines it spans.
struct DocLine {
    start: usize,
    end: usize,
    text: String,
}

fn doc_lines(attrs: &[syn::Attribute]) -> Vec<DocLine> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| {
            let syn::Meta::NameValue(nv) = &attr.meta else {
                return None;
            };
            let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(lit),
                ..
            }) = &nv.value
            else {
                return None;
            };
            let span = attr.span();
            Some(DocLine {
                start: span.start().line,
                end: span.end().line,
                text: lit.value(),
            })
        })
        .collect()
}

fn last_comment_group(attrs: &[syn::Attribute]) -> Option<String> {
    let lines = doc_lines(attrs);
    let mut groups: Vec<Vec<&DocLine>> = Vec::new();
    let mut prev_end: Option<usize> = None;

    for line in &lines {
        match (groups.last_mut(), prev_end) {
            (Some(group), Some(end)) if line.start <= end + 1 => group.push(line),
            _ => groups.push(vec![line]),
        }
        prev_end = Some(line.end);
    }

    let group = groups.pop()?;
    let text = group
        .iter()
        .flat_map(|line| {
            let block = line.text.contains('\n');
            // an empty `///` line is a paragraph break and must survive
            line.text
                .split('\n')
                .map(|l| clean_line(l, block))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let text = trim_blank_lines(&text).join("\n");
    if text.is_empty() { None } else { Some(text) }
}

/// Strips the single space after `///`. Lines of `/** */` comments also lose
/// their `*` gutter.
fn clean_line(line: &str, block: bool) -> String {
    let line = if block {
        line.trim_start().strip_prefix('*').unwrap_or(line)
    } else {
        line
    };
    line.strip_prefix(' ').unwrap_or(line).trim_end().to_string()
}

fn trim_blank_lines(lines: &[String]) -> &[String] {
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    &lines[start..end]
}
