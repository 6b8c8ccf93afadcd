//! Runner error types.

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::staging::StagingError;

/// Errors that can occur while running a migration.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// GitHub API client initialization errors.
    #[error("Failed to build GitHub client: {0}")]
    Client(#[source] ApiError),

    /// Fetching a source repository failed.
    #[error("Failed to fetch {repository}: {source}")]
    Fetch {
        repository: String,
        #[source]
        source: ApiError,
    },

    /// Writing or reading the staged files of a repository failed.
    #[error("Failed to stage {repository}: {source}")]
    Staging {
        repository: String,
        #[source]
        source: StagingError,
    },

    /// Recreating an issue in the destination failed.
    #[error("Failed to replay issue '{title}': {source}")]
    Replay {
        title: String,
        /// Destination number, if the issue was created before the failure.
        number: Option<u64>,
        #[source]
        source: ApiError,
    },

    /// Import or migrate was requested without a destination repository.
    #[error("No destination repository configured")]
    MissingDestination,
}
