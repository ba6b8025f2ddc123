//! Markdown report emission.
//!
//! One section per method:
//!
//! ```text
//! ## `method_name`
//! <doc comment>
//!
//! Inputs: `<JSON array of example arguments>`
//!
//! Response: `<JSON example of the return value>`
//! ```

use crate::synthesizer::Synthesizer;
use crate::template_engine::{METHOD_TEMPLATE, TemplateEngine};
use docgen_core::{Error, Example, InterfaceDesc, MethodDesc, MethodOrder, Result};
use docgen_introspector::DocSource;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Context of one rendered section.
#[derive(Debug, Clone, Serialize)]
struct MethodSection<'a> {
    name: &'a str,
    comment: &'a str,
    inputs: String,
    response: String,
}

/// Writes the documentation report for an interface.
#[derive(Debug)]
pub struct ReportEmitter<'a> {
    engine: TemplateEngine<'a>,
    skip_params: usize,
    order: MethodOrder,
}

impl<'a> ReportEmitter<'a> {
    /// Creates an emitter that skips one leading parameter and orders
    /// methods alphabetically.
    ///
    /// # Errors
    ///
    /// Returns error if the built-in templates fail to register.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            skip_params: 1,
            order: MethodOrder::default(),
        })
    }

    /// Sets how many leading parameters (after the receiver) are left out
    /// of the example arguments.
    #[must_use]
    pub const fn with_skip_params(mut self, skip_params: usize) -> Self {
        self.skip_params = skip_params;
        self
    }

    /// Sets the method order.
    #[must_use]
    pub const fn with_order(mut self, order: MethodOrder) -> Self {
        self.order = order;
        self
    }

    /// Mutable access to the template engine, to override the section
    /// layout.
    pub const fn engine_mut(&mut self) -> &mut TemplateEngine<'a> {
        &mut self.engine
    }

    /// Renders the section of one method.
    ///
    /// # Errors
    ///
    /// Returns an error if an argument or the return value has no example,
    /// or if rendering fails.
    pub fn render_method(
        &self,
        method: &MethodDesc,
        docs: &dyn DocSource,
        synth: &mut Synthesizer<'_>,
    ) -> Result<String> {
        let args = method
            .example_params(self.skip_params)
            .map(|param| synth.synthesize(&param.ty))
            .collect::<Result<Vec<_>>>()?;
        let response = synth.synthesize(&method.returns)?;

        let section = MethodSection {
            name: &method.name,
            comment: docs.comment_for(&method.name),
            inputs: Example::List(args).to_json()?,
            response: response.to_json()?,
        };
        self.engine.render(METHOD_TEMPLATE, &section)
    }

    /// Writes a section for every method of the interface and returns the
    /// number of sections written.
    ///
    /// # Errors
    ///
    /// Stops at the first method whose section cannot be rendered, or
    /// returns [`Error::Io`] if writing fails.
    pub fn run<W: Write>(
        &self,
        iface: &InterfaceDesc,
        docs: &dyn DocSource,
        synth: &mut Synthesizer<'_>,
        out: &mut W,
    ) -> Result<usize> {
        let mut written = 0;
        for method in iface.ordered_methods(self.order) {
            let section = self.render_method(method, docs, synth).inspect_err(|err| {
                tracing::error!(method = %method.name, error = %err, "cannot document method");
            })?;
            out.write_all(section.as_bytes()).map_err(output_error)?;
            tracing::debug!(method = %method.name, "documented method");
            written += 1;
        }
        out.flush().map_err(output_error)?;

        tracing::info!(
            interface = %iface.name,
            methods = written,
            order = %self.order,
            "report written"
        );
        Ok(written)
    }
}

fn output_error(source: std::io::Error) -> Error {
    Error::Io {
        path: PathBuf::from("<output>"),
        source,
    }
}
