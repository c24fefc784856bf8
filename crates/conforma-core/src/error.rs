//! Error types for the Conforma core library
//!
//! This module defines the library-level error handling, using thiserror for
//! ergonomic error definitions. Ordinary validation failures are *not* errors
//! in this sense: they accumulate in a [`ValidationResult`] and are returned
//! to the caller. The `Error` enum covers the two conditions that unwind a
//! validation pass instead: malformed regular expressions supplied by the
//! caller, and the fail-fast signal raised under `failOnFirstError`.
//!
//! [`ValidationResult`]: crate::validator::ValidationResult

use thiserror::Error;

use crate::validator::ValidationError;

/// Main error type for Conforma operations
#[derive(Error, Debug)]
pub enum Error {
    /// A `pattern` or `patternProperties` source string failed to compile.
    ///
    /// This is a schema-authoring mistake, not a data-validation outcome, so
    /// it propagates to the caller instead of joining the error list.
    #[error("invalid regular expression {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The first violation encountered under `failOnFirstError`.
    ///
    /// The display form reproduces the attribute-specific signal message;
    /// `error` carries the structured payload that was recorded before the
    /// validation pass unwound.
    #[error("{message}")]
    FailFast {
        message: String,
        error: ValidationError,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The structured violation behind a fail-fast error, if this is one.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Error::FailFast { error, .. } => Some(error),
            _ => None,
        }
    }
}
