//! Error types for the Sigap library.
//!
//! All errors are represented by the [`SigapError`] enum. The variants follow
//! the failure taxonomy of a sentiment update run: configuration problems are
//! fatal at startup, data access problems abort a run before anything is
//! written back, and fallback scorer problems are either absorbed (labelled
//! neutral) or surfaced depending on the configured policy.
//!
//! # Examples
//!
//! ```
//! use sigap::error::{SigapError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SigapError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Sigap operations.
#[derive(Error, Debug)]
pub enum SigapError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Missing or invalid configuration (thresholds, columns, endpoints, vocabulary).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The dataset could not be read or written.
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// A single record could not be interpreted.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The fallback sentiment scorer failed or was unreachable.
    #[error("Fallback scorer error: {0}")]
    Fallback(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with SigapError.
pub type Result<T> = std::result::Result<T, SigapError>;

impl SigapError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SigapError::Configuration(msg.into())
    }

    /// Create a new data access error.
    pub fn data_access<S: Into<String>>(msg: S) -> Self {
        SigapError::DataAccess(msg.into())
    }

    /// Create a new malformed record error.
    pub fn malformed_record<S: Into<String>>(msg: S) -> Self {
        SigapError::MalformedRecord(msg.into())
    }

    /// Create a new fallback scorer error.
    pub fn fallback<S: Into<String>>(msg: S) -> Self {
        SigapError::Fallback(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SigapError::Other(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        SigapError::Fallback(format!("Timeout: {}", msg.into()))
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SigapError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether this error came from the fallback scorer (including timeouts).
    pub fn is_fallback(&self) -> bool {
        matches!(self, SigapError::Fallback(_) | SigapError::Http(_))
    }
}
