//! Handlebars rendering of report sections.
//!
//! The report is markdown, not HTML, so escaping is off and doc comments
//! and JSON snippets reach the output byte for byte.
//!
//! # Examples
//!
//! ```
//! use docgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let engine = TemplateEngine::new().unwrap();
//! let section = engine
//!     .render(
//!         "report/method",
//!         &json!({
//!             "name": "get_height",
//!             "comment": "GetHeight returns current height",
//!             "inputs": "[]",
//!             "response": "9"
//!         }),
//!     )
//!     .unwrap();
//! assert!(section.starts_with("## `get_height`\n"));
//! ```

use docgen_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::fmt::Display;

/// Name of the per-method section template.
pub const METHOD_TEMPLATE: &str = "report/method";

/// Templates compiled into the binary, by registration name.
const BUILTIN_TEMPLATES: &[(&str, &str)] =
    &[(METHOD_TEMPLATE, include_str!("../templates/method.md.hbs"))];

/// Handlebars registry holding the report layout.
///
/// Strict mode is on, so a section whose context lacks a field the layout
/// uses fails instead of rendering an empty string.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates an engine with the built-in layouts registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if a built-in template does not
    /// compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, source) in BUILTIN_TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| template_error(format_args!("cannot compile built-in `{name}`"), e))?;
        }
        Ok(Self { handlebars })
    }

    /// Renders a registered template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] for an unknown template name,
    /// a context field the template needs but lacks, or a context that does
    /// not serialize.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| template_error(format_args!("cannot render `{template_name}`"), e))
    }

    /// Registers a template, replacing any template of that name.
    ///
    /// Replacing [`METHOD_TEMPLATE`] changes the layout of every report
    /// section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if the template does not
    /// compile.
    ///
    /// # Examples
    ///
    /// ```
    /// use docgen_codegen::template_engine::{METHOD_TEMPLATE, TemplateEngine};
    /// use serde_json::json;
    ///
    /// let mut engine = TemplateEngine::new().unwrap();
    /// engine
    ///     .register_template_string(METHOD_TEMPLATE, "* {{name}}: {{response}}\n")
    ///     .unwrap();
    /// let line = engine
    ///     .render(METHOD_TEMPLATE, &json!({"name": "version", "response": "768"}))
    ///     .unwrap();
    /// assert_eq!(line, "* version: 768\n");
    /// ```
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| template_error(format_args!("cannot compile `{name}`"), e))
    }
}

fn template_error(action: std::fmt::Arguments<'_>, err: impl Display) -> Error {
    Error::SerializationError {
        message: format!("{action}: {err}"),
        source: None,
    }
}
