//! Staging error types.

use crate::transform::TransformError;
use thiserror::Error;

/// Errors that can occur while writing or reading staged files.
#[derive(Debug, Error)]
pub enum StagingError {
    /// Failed to read or write a file.
    #[error("Failed to access '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A staged file is not valid JSON of the expected shape.
    #[error("Failed to parse '{path}': {source}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Records could not be serialized.
    #[error("Failed to serialize '{path}': {source}")]
    SerializeError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The staged records are inconsistent.
    #[error(transparent)]
    Transform(#[from] TransformError),
}
