//! Data integrity error types.

use thiserror::Error;

/// Inconsistencies between the issues and comments of one repository snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// A comment references an issue that is not part of the snapshot.
    #[error("Comment references unknown issue '{issue_url}'")]
    UnmatchedComment { issue_url: String },

    /// Two issues in the snapshot share the same URL.
    #[error("Issue '{url}' appears more than once")]
    DuplicateIssueUrl { url: String },
}
