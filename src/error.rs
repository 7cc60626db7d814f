//! Error types for the Ordo library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`OrdoError`] enum. Only structural failures are errors: a record that is
//! simply absent from a segment is modelled as a missing sort value, never as
//! an error.
//!
//! # Examples
//!
//! ```
//! use ordo::error::{OrdoError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(OrdoError::invalid_argument("num_hits must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Ordo operations.
#[derive(Error, Debug)]
pub enum OrdoError {
    /// I/O errors (configuration files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required collaborator or setting is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A domain record could not be rebuilt from a raw index record.
    #[error("Reconstruction error: {0}")]
    Reconstruction(String),

    /// Segment access errors (record lookup, reverse doc id resolution)
    #[error("Segment error: {0}")]
    Segment(String),

    /// The comparator protocol was driven out of order.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with OrdoError.
pub type Result<T> = std::result::Result<T, OrdoError>;

impl OrdoError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        OrdoError::Config(msg.into())
    }

    /// Create a new reconstruction error.
    pub fn reconstruction<S: Into<String>>(msg: S) -> Self {
        OrdoError::Reconstruction(msg.into())
    }

    /// Create a new segment error.
    pub fn segment<S: Into<String>>(msg: S) -> Self {
        OrdoError::Segment(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        OrdoError::InvalidOperation(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        OrdoError::InvalidArgument(msg.into())
    }

    /// Whether this error aborts the sort because the underlying data is
    /// structurally invalid for the comparator.
    pub fn is_reconstruction(&self) -> bool {
        matches!(self, OrdoError::Reconstruction(_))
    }
}
