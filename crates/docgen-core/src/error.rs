//! Error types for API documentation generation.
//!
//! A documentation run is a single offline pass over a fixed interface, so
//! almost every error here is fatal to the run. The one exception is a
//! failure to parse the doc comment source, which callers degrade to an
//! empty comment mapping.
//!
//! # Examples
//!
//! ```
//! use docgen_core::{Error, Result};
//!
//! fn require_example(type_name: &str, known: bool) -> Result<()> {
//!     if !known {
//!         return Err(Error::NoExample {
//!             type_name: type_name.to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_example("Ticket", false).unwrap_err();
//! assert!(err.is_missing_example());
//! assert_eq!(err.to_string(), "No example value for type: Ticket");
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for API documentation generation.
///
/// All errors in the workspace use this type, providing consistent error
/// handling across the introspector, the synthesizer and the report emitter.
#[derive(Error, Debug)]
pub enum Error {
    /// No registry entry and no shape rule applies to a type.
    ///
    /// Raised by the synthesizer for leaf types (primitives, newtypes,
    /// enums, maps) that have no registered example value.
    #[error("No example value for type: {type_name}")]
    NoExample {
        /// Canonical name of the unresolvable type
        type_name: String,
    },

    /// A struct re-entered itself while its own example was being built.
    #[error("Recursive type without example value: {type_name}")]
    RecursiveType {
        /// Name of the struct that refers back to itself
        type_name: String,
    },

    /// A source type cannot be mapped onto a type descriptor.
    ///
    /// Raised by the introspector for constructs such as function pointers
    /// or arrays whose length is not an integer literal.
    #[error("Unsupported type `{type_name}`: {reason}")]
    UnsupportedType {
        /// Rendered source type
        type_name: String,
        /// Why the type cannot be described
        reason: String,
    },

    /// The designated interface trait was not found in the source tree.
    #[error("Interface not found: {name}")]
    InterfaceNotFound {
        /// Trait name that was searched for
        name: String,
    },

    /// A source file could not be parsed.
    #[error("Failed to parse {}: {message}", path.display())]
    ParseError {
        /// File that failed to parse
        path: PathBuf,
        /// Parser diagnostic
        message: String,
    },

    /// Filesystem access failed.
    #[error("I/O error on {}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    ///
    /// Raised when the configuration file is malformed or contains values
    /// that cannot be interpreted.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Serialization or template rendering error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if no example value could be found for a type.
    ///
    /// # Examples
    ///
    /// ```
    /// use docgen_core::Error;
    ///
    /// let err = Error::NoExample {
    ///     type_name: "Ticket".to_string(),
    /// };
    /// assert!(err.is_missing_example());
    /// ```
    #[must_use]
    pub const fn is_missing_example(&self) -> bool {
        matches!(self, Self::NoExample { .. })
    }

    /// Returns `true` if this is a recursive type error.
    #[must_use]
    pub const fn is_recursive_type(&self) -> bool {
        matches!(self, Self::RecursiveType { .. })
    }

    /// Returns `true` if this is an unsupported type error.
    #[must_use]
    pub const fn is_unsupported_type(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }

    /// Returns `true` if the interface trait was not found.
    ///
    /// # Examples
    ///
    /// ```
    /// use docgen_core::Error;
    ///
    /// let err = Error::InterfaceNotFound {
    ///     name: "FullNode".to_string(),
    /// };
    /// assert!(err.is_interface_not_found());
    /// ```
    #[must_use]
    pub const fn is_interface_not_found(&self) -> bool {
        matches!(self, Self::InterfaceNotFound { .. })
    }

    /// Returns `true` if this is a source parse error.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use docgen_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "unknown list policy".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a serialization error.
    #[must_use]
    pub const fn is_serialization_error(&self) -> bool {
        matches!(self, Self::SerializationError { .. })
    }
}

/// Result type alias for documentation generation.
///
/// # Examples
///
/// ```
/// use docgen_core::{Error, Result};
///
/// fn parse_count(value: &str) -> Result<usize> {
///     value
///         .parse()
///         .map_err(|_| Error::InvalidArgument(format!("not a count: {value}")))
/// }
///
/// assert_eq!(parse_count("2").unwrap(), 2);
/// assert!(parse_count("two").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_example_detection() {
        let err = Error::NoExample {
            type_name: "Ticket".to_string(),
        };
        assert!(err.is_missing_example());
        assert!(!err.is_recursive_type());
    }

    #[test]
    fn test_missing_example_message_names_type() {
        let err = Error::NoExample {
            type_name: "HashMap<String, Claim>".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No example value for type: HashMap<String, Claim>"
        );
    }

    #[test]
    fn test_recursive_type_detection() {
        let err = Error::RecursiveType {
            type_name: "Node".to_string(),
        };
        assert!(err.is_recursive_type());
        assert!(err.to_string().contains("Node"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::ParseError {
            path: PathBuf::from("api/full.rs"),
            message: "expected `;`".to_string(),
        };
        assert!(err.is_parse_error());
        assert_eq!(err.to_string(), "Failed to parse api/full.rs: expected `;`");
    }

    #[test]
    fn test_io_error_has_source() {
        let err = Error::Io {
            path: PathBuf::from("missing.rs"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("missing.rs"));
    }

    #[test]
    fn test_unsupported_type_detection() {
        let err = Error::UnsupportedType {
            type_name: "fn(u8)".to_string(),
            reason: "function pointers have no example".to_string(),
        };
        assert!(err.is_unsupported_type());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
