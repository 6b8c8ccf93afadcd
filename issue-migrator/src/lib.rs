#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod api;
pub mod config;
pub mod model;
pub mod rate_limit;
pub mod runner;
pub mod staging;
pub mod summary;
pub mod transform;

pub use api::{fetch_all, ApiError, GitHubClient, IssueTracker, PageSource, RawPage};
pub use config::{resolve_token, ConfigError, MigrationPlan};
pub use model::{
    CreatedIssue, IssueDraft, IssueInfo, RawComment, RawIssue, RawLabel, RawUser, RepoLocation,
};
pub use rate_limit::{wait_if_needed, RateLimitInfo};
pub use runner::{
    export_repos, import_repos, replay, FailurePolicy, Runner, RunnerConfig, RunnerError,
};
pub use staging::{load_issue_infos, save_comments, save_issues, StagingError};
pub use summary::{ExportResult, IssueResult, RunSummary};
pub use transform::{
    associate_comments, rewrite_commit_references, TransformError, TransformOptions,
    UnmatchedCommentPolicy,
};
