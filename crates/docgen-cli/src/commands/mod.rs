//! Command implementations for the docgen CLI.
//!
//! Each command module loads what it needs through [`common`], runs the
//! operation and writes its output to stdout.

pub mod common;
pub mod completions;
pub mod example;
pub mod generate;
