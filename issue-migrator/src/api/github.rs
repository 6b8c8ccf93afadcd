//! GitHub REST implementation of [`IssueTracker`].

use super::{fetch_all, ApiError, IssueTracker, PageSource, RawPage};
use crate::model::{CreatedIssue, IssueDraft, RawComment, RawIssue, RepoLocation};
use crate::rate_limit::{wait_if_needed, RateLimitInfo};
use http::StatusCode;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use url::Url;

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size GitHub accepts for listings.
const PER_PAGE: &str = "100";

/// Authenticated GitHub client, built once and shared by every operation.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
    api_base: Url,
}

impl GitHubClient {
    /// Creates a client for the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the underlying HTTP client cannot be built.
    pub fn new(token: &str) -> Result<Self, ApiError> {
        Self::with_api_url(token, DEFAULT_API_URL)
    }

    /// Creates a client for a GitHub-compatible API rooted at `api_url`,
    /// e.g. `https://github.example.com/api/v3` for GitHub Enterprise.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] for an unusable URL, or
    /// [`ApiError::Network`] if the underlying HTTP client cannot be built.
    ///
    /// Requests are sent once; failed calls are never retried.
    pub fn with_api_url(token: &str, api_url: &str) -> Result<Self, ApiError> {
        let api_base = parse_api_base(api_url)?;
        // Every request is sent exactly once.
        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())?
            .add_retry_config(RetryConfig::None)
            .build()?;

        Ok(Self { octocrab, api_base })
    }

    /// First page of the repository's issue listing, all states, newest first.
    pub fn issues_url(&self, repo: &RepoLocation) -> String {
        let mut url = self.endpoint(repo, &["issues"]);
        url.query_pairs_mut()
            .append_pair("state", "all")
            .append_pair("sort", "created")
            .append_pair("direction", "desc")
            .append_pair("per_page", PER_PAGE);
        url.into()
    }

    /// First page of the repository-wide issue comment listing, newest first.
    pub fn comments_url(&self, repo: &RepoLocation) -> String {
        let mut url = self.endpoint(repo, &["issues", "comments"]);
        url.query_pairs_mut()
            .append_pair("sort", "created")
            .append_pair("direction", "desc")
            .append_pair("per_page", PER_PAGE);
        url.into()
    }

    fn endpoint(&self, repo: &RepoLocation, tail: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        // `parse_api_base` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", repo.owner.as_str(), repo.name.as_str()])
                .extend(tail);
        }
        url
    }
}

impl PageSource for GitHubClient {
    async fn get_page(&self, url: &str) -> Result<RawPage, ApiError> {
        let response = self.octocrab._get(url).await?;
        let rate_limit = RateLimitInfo::from_headers(response.headers());
        let status = response.status();
        let link = response
            .headers()
            .get("link")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = self.octocrab.body_to_string(response).await?;

        ensure_success("GET", url, status, &body)?;
        pace(rate_limit).await;

        Ok(RawPage { body, link })
    }
}

impl IssueTracker for GitHubClient {
    async fn list_issues(&self, repo: &RepoLocation) -> Result<Vec<RawIssue>, ApiError> {
        let issues: Vec<RawIssue> = fetch_all(self, &self.issues_url(repo)).await?;
        info!(repo = %repo, count = issues.len(), "Fetched issues");
        Ok(issues)
    }

    async fn list_comments(&self, repo: &RepoLocation) -> Result<Vec<RawComment>, ApiError> {
        let comments: Vec<RawComment> = fetch_all(self, &self.comments_url(repo)).await?;
        info!(repo = %repo, count = comments.len(), "Fetched comments");
        Ok(comments)
    }

    async fn create_issue(
        &self,
        repo: &RepoLocation,
        draft: &IssueDraft,
    ) -> Result<CreatedIssue, ApiError> {
        let url = String::from(self.endpoint(repo, &["issues"]));
        debug!(url = %url, title = %draft.title, "Creating issue");

        let response = self.octocrab._post(url.as_str(), Some(draft)).await?;
        let rate_limit = RateLimitInfo::from_headers(response.headers());
        let status = response.status();
        let body = self.octocrab.body_to_string(response).await?;

        ensure_success("POST", &url, status, &body)?;
        pace(rate_limit).await;

        parse_created_issue(&url, &body)
    }

    async fn close_issue(&self, repo: &RepoLocation, number: u64) -> Result<(), ApiError> {
        let number = number.to_string();
        let url = String::from(self.endpoint(repo, &["issues", &number]));
        debug!(url = %url, "Closing issue");

        let response = self
            .octocrab
            ._patch(url.as_str(), Some(&json!({ "state": "closed" })))
            .await?;
        let rate_limit = RateLimitInfo::from_headers(response.headers());
        let status = response.status();
        let body = self.octocrab.body_to_string(response).await?;

        ensure_success("PATCH", &url, status, &body)?;
        pace(rate_limit).await;
        Ok(())
    }

    async fn add_comment(
        &self,
        repo: &RepoLocation,
        number: u64,
        body: &str,
    ) -> Result<(), ApiError> {
        let number = number.to_string();
        let url = String::from(self.endpoint(repo, &["issues", &number, "comments"]));
        debug!(url = %url, "Posting comment");

        let response = self
            .octocrab
            ._post(url.as_str(), Some(&json!({ "body": body })))
            .await?;
        let rate_limit = RateLimitInfo::from_headers(response.headers());
        let status = response.status();
        let response_body = self.octocrab.body_to_string(response).await?;

        ensure_success("POST", &url, status, &response_body)?;
        pace(rate_limit).await;
        Ok(())
    }
}

fn parse_api_base(api_url: &str) -> Result<Url, ApiError> {
    let url = Url::parse(api_url).map_err(|e| ApiError::InvalidUrl {
        url: api_url.to_string(),
        message: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl {
            url: api_url.to_string(),
            message: "not a hierarchical URL".to_string(),
        });
    }

    Ok(url)
}

async fn pace(rate_limit: Option<RateLimitInfo>) {
    if let Some(info) = rate_limit {
        wait_if_needed(&info).await;
    }
}

fn ensure_success(
    method: &'static str,
    url: &str,
    status: StatusCode,
    body: &str,
) -> Result<(), ApiError> {
    if status.is_success() {
        return Ok(());
    }

    Err(ApiError::Remote {
        method,
        url: url.to_string(),
        status: status.as_u16(),
        message: error_message(body),
    })
}

/// Extracts GitHub's `message` field from an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

fn parse_created_issue(url: &str, body: &str) -> Result<CreatedIssue, ApiError> {
    #[derive(Deserialize)]
    struct CreatedIssueBody {
        number: Option<u64>,
        html_url: Option<String>,
    }

    let created: CreatedIssueBody =
        serde_json::from_str(body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })?;

    let number = created
        .number
        .filter(|number| *number > 0)
        .ok_or_else(|| ApiError::MissingIssueNumber {
            url: url.to_string(),
        })?;

    Ok(CreatedIssue {
        number,
        html_url: created.html_url,
    })
}
