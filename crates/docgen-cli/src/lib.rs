//! API docgen CLI library.
//!
//! This library provides the core functionality for the `api-docgen` tool,
//! exposing the argument definitions, commands and runner so they can be
//! tested.

pub mod cli;
pub mod commands;
pub mod runner;

pub use cli::{Cli, Commands};
