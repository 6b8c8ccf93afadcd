//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading a migration plan.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse migration plan '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Validation error in the plan.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// The resolved configuration is unusable.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    /// No access token was supplied.
    #[error("No GitHub token provided; pass --token or set GITHUB_TOKEN")]
    MissingToken,
}
