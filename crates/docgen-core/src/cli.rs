//! CLI-specific types.
//!
//! A documentation run has no partial results: the report is either
//! complete or the run failed, and usage errors are reported by the
//! argument parser before a run starts.
//!
//! # Examples
//!
//! ```
//! use docgen_core::cli::ExitCode;
//!
//! assert_eq!(ExitCode::Success.code(), 0);
//! assert_eq!(ExitCode::Failure.code(), 1);
//! assert_eq!(ExitCode::default(), ExitCode::Success);
//! ```

use std::fmt;

/// Process exit status of a documentation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExitCode {
    /// The report was written completely
    #[default]
    Success,
    /// The run stopped on a fatal error; stdout may hold a partial report
    Failure,
}

impl ExitCode {
    /// Numeric status passed to the operating system.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.code())
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
