//! Issue tracker error types.

use thiserror::Error;

/// Errors that can occur while talking to the issue tracker.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request or transport failure.
    #[error("GitHub API error: {0}")]
    Network(#[from] octocrab::Error),

    /// The tracker answered with a non-success status.
    #[error("{method} {url} failed with status {status}: {message}")]
    Remote {
        method: &'static str,
        url: String,
        status: u16,
        message: String,
    },

    /// A response body could not be decoded.
    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// An issue was created but the response carried no issue number.
    #[error("Created issue response from '{url}' has no issue number")]
    MissingIssueNumber { url: String },

    /// A `next` link pointed back at a page that was already fetched.
    #[error("Pagination loop detected at '{url}'")]
    PaginationLoop { url: String },

    /// The configured API base URL is unusable.
    #[error("Invalid API URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}
