//! Core types, example values, configuration and errors for API doc generation.
//!
//! This crate provides the foundational types used across the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Type descriptors (`TypeDesc`, `StructTable`) and method descriptors
//! - Example values (`Example`) and their JSON encoding
//! - Run configuration (`DocgenConfig`)
//! - Error type with contextual information

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod example;
mod types;

pub mod cli;

pub use config::{DEFAULT_CONFIG_FILE, DocgenConfig, MapExample};
pub use error::{Error, Result};
pub use example::{Example, ListPolicy, StructExample};
pub use types::{
    FieldDef, InterfaceDesc, MethodDesc, MethodOrder, ParamDesc, StructTable, TypeDesc,
};
