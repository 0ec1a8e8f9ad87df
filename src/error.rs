//! Error types for type-ahead lookups.
//!
//! All errors implement the `std::error::Error` trait and carry structured
//! context. A superseded throttler request is *not* an error - it is the
//! normal `Ok(false)` outcome of [`crate::InputThrottler::enqueue`].
//!
//! ## Error Categories
//!
//! - **File Errors**: the country dataset file could not be read
//! - **Parse Errors**: the dataset JSON is malformed
//! - **Action Errors**: a bound refresh action failed while running
//! - **Shutdown**: a run's completion signal was dropped mid-flight
//!
//! ## Helper Constructors
//!
//! ```rust
//! use typeahead::TypeAheadError;
//! use std::path::PathBuf;
//!
//! let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
//! let file_error = TypeAheadError::file_error(PathBuf::from("data/countries.json"), io_err);
//!
//! let action_error = TypeAheadError::action_failed("country refresh query timed out");
//! assert!(action_error.is_retryable());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for type-ahead operations.
pub type Result<T, E = TypeAheadError> = std::result::Result<T, E>;

/// Main error type for type-ahead operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TypeAheadError {
    #[error("country data file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("refresh action failed: {reason}")]
    Action {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("throttler shut down before the request completed")]
    Shutdown,
}

impl TypeAheadError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            TypeAheadError::Action { .. } => true,
            TypeAheadError::Shutdown => false,
            TypeAheadError::File { .. } => false,
            TypeAheadError::Parse { .. } => false,
        }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        TypeAheadError::File { path, source }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        TypeAheadError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for action failures.
    pub fn action_failed(reason: impl Into<String>) -> Self {
        TypeAheadError::Action { reason: reason.into(), source: None }
    }

    /// Helper constructor for action failures with an underlying source.
    pub fn action_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        TypeAheadError::Action { reason: reason.into(), source: Some(source) }
    }
}

impl From<std::io::Error> for TypeAheadError {
    fn from(err: std::io::Error) -> Self {
        TypeAheadError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}

impl From<serde_json::Error> for TypeAheadError {
    fn from(err: serde_json::Error) -> Self {
        TypeAheadError::Parse { context: "country dataset".to_string(), details: err.to_string() }
    }
}
