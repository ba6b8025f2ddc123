//! Example synthesis and report emission for API documentation.
//!
//! Turns an interface description into a markdown report: each method gets
//! its doc comment, a JSON example of its arguments and a JSON example of
//! its return value. Examples come from an [`ExampleRegistry`] of
//! hand-picked literals, extended by the [`Synthesizer`] for composite
//! types.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod registry;
pub mod report;
pub mod seeds;
pub mod synthesizer;
pub mod template_engine;

pub use registry::ExampleRegistry;
pub use report::ReportEmitter;
pub use synthesizer::Synthesizer;
pub use template_engine::TemplateEngine;
