//! Issue tracker access.
//!
//! [`IssueTracker`] is the seam between the migration logic and the remote
//! API. [`GitHubClient`] implements it on top of octocrab; tests substitute
//! in-memory trackers.

mod error;
mod github;
pub mod link;
mod pagination;

pub use error::ApiError;
pub use github::{GitHubClient, DEFAULT_API_URL};
pub use pagination::fetch_all;

use crate::model::{CreatedIssue, IssueDraft, RawComment, RawIssue, RepoLocation};

/// One page of a listing response.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// Response body, a JSON array.
    pub body: String,

    /// Raw value of the `link` response header.
    pub link: Option<String>,
}

/// Performs single GET requests for [`fetch_all`].
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Fetches one page.
    ///
    /// Implementations return [`ApiError::Remote`] for non-success statuses.
    async fn get_page(&self, url: &str) -> Result<RawPage, ApiError>;
}

/// The five operations a migration needs from an issue tracker.
#[allow(async_fn_in_trait)]
pub trait IssueTracker {
    /// Lists every issue of the repository, open and closed, newest first.
    async fn list_issues(&self, repo: &RepoLocation) -> Result<Vec<RawIssue>, ApiError>;

    /// Lists every issue comment of the repository, newest first.
    async fn list_comments(&self, repo: &RepoLocation) -> Result<Vec<RawComment>, ApiError>;

    /// Creates an issue and returns the number the tracker assigned to it.
    async fn create_issue(
        &self,
        repo: &RepoLocation,
        draft: &IssueDraft,
    ) -> Result<CreatedIssue, ApiError>;

    /// Sets the state of an issue to closed.
    async fn close_issue(&self, repo: &RepoLocation, number: u64) -> Result<(), ApiError>;

    /// Appends a comment to an issue.
    async fn add_comment(
        &self,
        repo: &RepoLocation,
        number: u64,
        body: &str,
    ) -> Result<(), ApiError>;
}
