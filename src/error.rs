//! Error types for coverage configuration.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading a coverage
//! configuration or filtering data against it.

use thiserror::Error;

/// The broad category an error belongs to.
///
/// Callers that only care whether something was missing, malformed, or of
/// the wrong type can match on this instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A file, source key, or column does not exist.
    NotFound,
    /// Input text is malformed or has the wrong overall shape.
    InvalidFormat,
    /// A value could not be coerced to the expected type.
    TypeMismatch,
    /// A required optional capability is not compiled in.
    Unavailable,
    /// The caller supplied an input the operation cannot work with.
    InvalidInput,
    /// A file exists but could not be read or written.
    Io,
}

/// The main error type for coverage configuration.
///
/// # Example
///
/// ```
/// use coverage_config::error::{CoverageError, ErrorKind};
///
/// let error = CoverageError::SourceNotFound {
///     key: "gbd".to_string(),
/// };
/// assert_eq!(error.to_string(), "Source not found in config: gbd");
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Error)]
pub enum CoverageError {
    /// Configuration file was not found at the specified path.
    #[error("Coverage config not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A file could not be read or written.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// The path (or stream) that failed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Input text is malformed: bad YAML, a non-mapping top level, or a
    /// ragged table.
    #[error("Invalid format in '{origin}': {message}")]
    InvalidFormat {
        /// Where the text came from (a path, or `<memory>`).
        origin: String,
        /// A description of the problem.
        message: String,
    },

    /// Source key is not present under `sources`.
    #[error("Source not found in config: {key}")]
    SourceNotFound {
        /// The source key that was looked up.
        key: String,
    },

    /// Column is not present in a table.
    #[error("Column not found: {column}")]
    ColumnNotFound {
        /// The column name that was looked up.
        column: String,
    },

    /// A value could not be coerced to the expected type.
    #[error("Cannot read '{field}' as {expected}: found {found}")]
    TypeMismatch {
        /// The field or position holding the value.
        field: String,
        /// The type that was expected.
        expected: &'static str,
        /// A rendering of the value that was found.
        found: String,
    },

    /// An optional capability is not available in this build.
    #[error("{capability} support is not available in this build")]
    Unavailable {
        /// The missing capability.
        capability: &'static str,
    },

    /// An intersection window was requested over no sources.
    #[error("Cannot compute an effective window over an empty source list")]
    EmptySourceList,
}

impl CoverageError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigNotFound { .. } | Self::SourceNotFound { .. } | Self::ColumnNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            Self::EmptySourceList => ErrorKind::InvalidInput,
            Self::Io { .. } => ErrorKind::Io,
        }
    }
}

/// A type alias for Results that return CoverageError.
pub type CoverageResult<T> = Result<T, CoverageError>;
