//! Error types for the place-data crate.
//!
//! Loading is the only fallible part of the data layer: reading snapshot
//! files, decoding the API wire format, and validating the resulting index.

use thiserror::Error;

/// Errors that can occur while loading and validating place snapshots
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Document is not valid JSON or does not match the wire format
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Document decoded but could not be turned into places
    ///
    /// Carries the source name so multi-file loads can point at the culprit.
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// The response envelope reported `success: false`
    #[error("Envelope reported failure: {0}")]
    UnsuccessfulEnvelope(String),

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
